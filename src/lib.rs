//! Client for the Meetup REST API and its OAuth2 authorization-code flow.
//!
//! Parameters supplied at construction (an API key or OAuth client
//! credentials) are merged into every request; each call performs exactly
//! one HTTP request and returns the decoded JSON payload or a classified
//! [`Error`].
//!
//! ```no_run
//! use meetup_api::{Meetup, params};
//!
//! # async fn run() -> meetup_api::Result<()> {
//! let client = Meetup::new(params(&[("key", "your-api-key")]))?;
//!
//! let mut page = client.events(params(&[("group_urlname", "rust-meetup")])).await?;
//! while Meetup::has_next(&page) {
//!     page = client.get_next(&page).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod http;

pub use api::{Config, Meetup, MeetupApi, Params, params};
pub use error::{DecodeReason, Error, Result};
