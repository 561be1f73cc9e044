//! Library layer for the Picsum gallery: incremental photo loading, detail
//! loading, configuration, and input validation.
//!
//! Wraps the `picsum_api` crate behind the [`Catalog`] trait so the loaders
//! can be driven by the real HTTP client or by an in-memory double.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod loader;
pub mod validation;

pub use picsum_api;
pub use picsum_api::types;
pub use picsum_api::{Client, ListQuery, Query};

pub use catalog::Catalog;
pub use config::GalleryConfig;
pub use detail::{load_detail, DetailLoader, DetailState, PhotoDetail};
pub use error::{GalleryError, LoadError};
pub use loader::{
    FetchHandle, FetchOutcome, LoaderSnapshot, PaginationState, PhotoLoader, VisibilityTrigger,
};
