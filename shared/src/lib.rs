//! Shared types for the cafe ordering client
//!
//! Domain models, the catalog query engine, the shopping cart and the
//! unified error/response types. Nothing in this crate performs I/O.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod models;
pub mod query;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartLine};
pub use catalog::{CatalogPage, CatalogQuery, SortKey, SortOrder};
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use query::{PaginatedResponse, ProductListQuery};
