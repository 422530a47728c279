//! Data models
//!
//! Wire DTOs are validated into these types at the service boundary;
//! everything downstream works with the validated forms.

pub mod activity;
pub mod category;
pub mod member;
pub mod product;

// Re-exports
pub use activity::*;
pub use category::*;
pub use member::*;
pub use product::*;
