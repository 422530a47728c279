//! Member Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Minimum password length accepted by the signup and login forms
pub const MIN_PASSWORD_LEN: u64 = 6;

/// Member entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "memberNick")]
    pub nickname: String,
    #[serde(alias = "memberPhone")]
    pub phone: String,
    #[serde(default, alias = "memberImage")]
    pub image: Option<String>,
    #[serde(default, alias = "memberPoints")]
    pub points: i64,
}

/// Signup form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MemberSignup {
    #[validate(length(min = 1, message = "Nickname is required"))]
    pub nickname: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl MemberSignup {
    pub fn new(
        nickname: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Login form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MemberLogin {
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl MemberLogin {
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Signup / login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub member: Member,
    /// Bearer token, absent when the backend authenticates with a cookie
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
}
