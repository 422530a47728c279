//! Backend service calls
//!
//! Each submodule adds one service's endpoints to [`crate::HttpClient`].

mod activity;
mod members;
mod products;

pub use products::MAX_CATALOG_PAGES;
