//! HTTP access to the restomod backend
//!
//! This crate provides:
//! - `ApiClient`: reqwest-based client for the listing and lead endpoints
//! - Normalization of backend records into the canonical core types
//! - The server-side pagination adapter (`ListingSource`, `PagedListing`)

pub mod client;
pub mod error;
pub mod normalize;
pub mod source;

pub use client::{ApiClient, ClientOptions, Endpoints};
pub use error::{FetchCause, ListingFetchError, Result, SubmitError};
pub use source::{BlogSource, ListingSource, PagedListing};
