//! Typed HTTP client for the Lorem Picsum photo catalog.
//!
//! Covers the three catalog resources a gallery needs: paged photo listings,
//! single photo metadata, and sized image URLs.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::Error;
pub use self::query::{ListQuery, Query, DEFAULT_LIMIT};
