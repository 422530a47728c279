//! Client error types

use crate::storage::StorageError;
use reqwest::StatusCode;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Message shown to the member when a service call fails for reasons they
/// cannot fix
pub const GENERIC_USER_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend answered with an unexpected status
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Structured error: form validation or a backend error envelope
    #[error(transparent)]
    App(#[from] AppError),

    /// Local storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::App(errors.into())
    }
}

impl ClientError {
    /// Whether this is an inline form error raised before any request
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::App(AppError {
                code: ErrorCode::ValidationFailed
                    | ErrorCode::RequiredField
                    | ErrorCode::PasswordTooShort,
                ..
            })
        )
    }

    /// Whether the backend reported the resource as missing, either by bare
    /// status or by a not-found error envelope
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::NotFound(_) => true,
            ClientError::App(e) => e.http_status() == StatusCode::NOT_FOUND,
            _ => false,
        }
    }

    /// Text safe to show the member.
    ///
    /// Known codes outside the system family carry their own message; the rest
    /// collapses to [`GENERIC_USER_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            ClientError::App(e) if e.code.is_user_facing() => e.message.clone(),
            ClientError::Unauthorized => "Please log in to continue.".to_string(),
            _ => GENERIC_USER_MESSAGE.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ApiResponse;

    #[test]
    fn test_validation_error_is_shown_verbatim() {
        let err = ClientError::App(AppError::with_message(
            ErrorCode::PasswordTooShort,
            "Password must be at least 6 characters",
        ));
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_service_errors_are_generic() {
        let err = ClientError::Server {
            status: 502,
            body: "upstream exploded".into(),
        };
        assert!(!err.is_validation());
        assert_eq!(err.user_message(), GENERIC_USER_MESSAGE);

        let err = ClientError::App(AppError::internal("db down"));
        assert_eq!(err.user_message(), GENERIC_USER_MESSAGE);
    }

    #[test]
    fn test_unknown_backend_code_hides_its_message() {
        let body = r#"{"code":5003,"message":"MongoServerError: connect ECONNREFUSED 10.0.0.7:27017"}"#;
        let envelope: ApiResponse<()> = serde_json::from_str(body).unwrap();
        let err = ClientError::from(envelope.into_result().unwrap_err());

        assert!(matches!(&err, ClientError::App(e) if e.code == ErrorCode::Unknown));
        assert_eq!(err.user_message(), GENERIC_USER_MESSAGE);
    }

    #[test]
    fn test_not_found_envelope_counts_as_not_found() {
        assert!(ClientError::NotFound("gone".into()).is_not_found());
        assert!(ClientError::App(AppError::not_found("View counter")).is_not_found());
        assert!(ClientError::App(AppError::new(ErrorCode::ProductNotFound)).is_not_found());
        assert!(!ClientError::App(AppError::internal("db down")).is_not_found());
        assert!(!ClientError::Unauthorized.is_not_found());
    }
}
