//! Error families, keyed by the thousands digit of the code

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// 0xxx
    General,
    /// 1xxx, sign-in and session problems
    Auth,
    /// 6xxx, catalog items and cart lines
    Product,
    /// 8xxx, member accounts
    Member,
    /// 9xxx and anything unassigned
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            6 => Self::Product,
            8 => Self::Member,
            _ => Self::System,
        }
    }

    /// Whether messages in this family can be shown to a member as-is
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::System)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Product => "product",
            Self::Member => "member",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Whether the message paired with this code can be shown to a member.
    ///
    /// `Unknown` stands in for codes this build cannot decode, so the text
    /// travelling with it is untrusted.
    pub fn is_user_facing(&self) -> bool {
        *self != Self::Unknown && self.category().is_user_facing()
    }
}
