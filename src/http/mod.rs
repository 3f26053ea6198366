//! Transport layer: request execution, JSON decoding, failure classification.

mod client;

pub use client::{HttpClient, Method};
