//! Core domain models and logic for restomod
//!
//! This crate contains:
//! - Domain models (CatalogItem, BlogPost and the other listings)
//! - Filter engine (pure, deterministic catalog filtering)
//! - Pagination state (PageSpec, Page, ListingView)

pub mod error;
pub mod filter;
pub mod item;
pub mod listing;
pub mod page;
pub mod spec;

pub use error::{CoreError, Result};
pub use filter::{SortKey, filter, max_observed_price, sort_visible};
pub use item::{CatalogItem, ItemStatus};
pub use listing::{BlogPost, Brand, JobPosting, ServicePackage};
pub use page::{ListingView, LoadState, Page, RequestTicket};
pub use spec::{DEFAULT_PAGE_SIZE, FilterSpec, PRICE_CEILING_FLOOR, PageSpec, PriceRange, Selector};
