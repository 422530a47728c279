//! Error codes, the coded [`AppError`] and the [`ApiResponse`] envelope
//!
//! ```
//! use shared::error::{AppError, ErrorCategory, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ProductOutOfStock).with_detail("id", "p1");
//! assert_eq!(err.code.code(), 6003);
//! assert_eq!(err.code.category(), ErrorCategory::Product);
//! assert_eq!(err.to_string(), "Product is out of stock");
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
