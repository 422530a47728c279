//! Numeric error codes
//!
//! | Range | Family |
//! |-------|--------|
//! | 0xxx | general |
//! | 1xxx | auth |
//! | 6xxx | product and cart (66xx) |
//! | 8xxx | member |
//! | 9xxx | system, local or transport |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Code carried in the `code` field of the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // general
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 5,
    RequiredField = 7,

    // auth
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    PasswordTooShort = 1008,

    // product
    ProductNotFound = 6001,
    /// Negative, non-finite or unparsable price
    ProductInvalidPrice = 6002,
    ProductOutOfStock = 6003,
    CartItemNotFound = 6601,
    /// Outside 1..=99
    CartInvalidQuantity = 6602,

    // member
    MemberNotFound = 8005,
    MemberPhoneExists = 8006,

    // system
    InternalError = 9001,
    /// Client-side store failure
    StorageError = 9002,
    NetworkError = 9003,
    TimeoutError = 9004,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Stock message, used when the backend sends none
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            ErrorCode::NotAuthenticated => "Member is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid phone number or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::PasswordTooShort => "Password is too short",

            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::CartItemNotFound => "Cart item not found",
            ErrorCode::CartInvalidQuantity => "Invalid cart quantity",

            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::MemberPhoneExists => "Phone number is already registered",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Local storage error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// HTTP status the backend answers with for this code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::ProductNotFound
            | Self::CartItemNotFound
            | Self::MemberNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists | Self::MemberPhoneExists => StatusCode::CONFLICT,

            Self::NotAuthenticated | Self::InvalidCredentials | Self::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::PasswordTooShort
            | Self::ProductInvalidPrice
            | Self::ProductOutOfStock
            | Self::CartInvalidQuantity => StatusCode::BAD_REQUEST,

            Self::TimeoutError => StatusCode::GATEWAY_TIMEOUT,
            Self::NetworkError => StatusCode::BAD_GATEWAY,

            Self::Unknown
            | Self::InternalError
            | Self::StorageError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `u16` outside the code table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1008 => Ok(ErrorCode::PasswordTooShort),

            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6601 => Ok(ErrorCode::CartItemNotFound),
            6602 => Ok(ErrorCode::CartInvalidQuantity),

            8005 => Ok(ErrorCode::MemberNotFound),
            8006 => Ok(ErrorCode::MemberPhoneExists),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
