//! The Meetup API surface: client, parameters, and path templates.

mod client;
mod params;
mod path;
mod types;

pub use client::{ACCESS_URL, API_URL, AUTHORIZE_URL, Config, Meetup, MeetupApi};
pub use params::{Params, merge, params};
pub use path::resolve_path;
pub use types::Meta;
