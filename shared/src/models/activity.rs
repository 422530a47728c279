//! Activity tracking events

use super::member::Member;
use serde::{Deserialize, Serialize};

/// Marker sent in place of a member id for anonymous visitors
pub const ANONYMOUS_ACTOR: &str = "anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    View,
}

/// Who performed an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Actor {
    Member(String),
    Anonymous,
}

impl Actor {
    pub fn from_member(member: Option<&Member>) -> Self {
        member
            .map(|m| Actor::Member(m.id.clone()))
            .unwrap_or(Actor::Anonymous)
    }
}

impl From<String> for Actor {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ANONYMOUS_ACTOR {
            Actor::Anonymous
        } else {
            Actor::Member(value)
        }
    }
}

impl From<Actor> for String {
    fn from(actor: Actor) -> Self {
        match actor {
            Actor::Member(id) => id,
            Actor::Anonymous => ANONYMOUS_ACTOR.to_string(),
        }
    }
}

/// Fire-and-forget event for the activity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub product_id: String,
    #[serde(rename = "member_id")]
    pub actor: Actor,
}

impl ActivityEvent {
    pub fn view(product_id: impl Into<String>, actor: Actor) -> Self {
        Self {
            kind: ActivityKind::View,
            product_id: product_id.into(),
            actor,
        }
    }
}
