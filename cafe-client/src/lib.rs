//! Cafe Client - client core for the cafe storefront
//!
//! Talks to the product, member and activity services over HTTP and keeps
//! per-browser state (session id, viewed markers, signed-in member, cart)
//! in a local key/value store.
//!
//! ```no_run
//! use cafe_client::{AppContext, AuthFlow, ClientConfig, HttpViewReporter};
//! use shared::query::ProductListQuery;
//! use std::sync::Arc;
//!
//! # async fn run() -> cafe_client::ClientResult<()> {
//! let config = ClientConfig::from_env();
//! let http = config.build_http_client()?;
//! let ctx = AppContext::load(config.open_store()?)
//!     .with_reporter(Arc::new(HttpViewReporter::new(http.clone())));
//!
//! let products = http.fetch_catalog(&ProductListQuery::default()).await?;
//! let query = config.catalog_query().with_search("latte");
//! let page = query.apply(&products);
//!
//! if let Some(product) = page.items.first() {
//!     let outcome = ctx.view_counter().record_view(&product.id, product.views);
//!     println!("{} views", outcome.views);
//! }
//! let _auth = AuthFlow::new(http);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod session;
pub mod storage;
pub mod views;

pub use auth::AuthFlow;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::{AppContext, SessionId};
pub use storage::{KeyValueStore, LocalStore, MemoryStore, StorageError, StoreExt};
pub use views::{HttpViewReporter, ViewCounter, ViewEvent, ViewOutcome, ViewReporter};

// Re-export shared types for convenience
pub use shared::error::{ApiResponse, AppError, ErrorCode};
pub use shared::models::{LoginResponse, Member, Product};
