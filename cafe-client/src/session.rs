//! Per-browser session state
//!
//! [`AppContext`] is the single owner of client state: the store, the
//! anonymous session id, the signed-in member and the cart. It is passed
//! explicitly to whatever needs it.

use crate::storage::{KeyValueStore, StoreExt};
use crate::views::{ViewCounter, ViewReporter};
use serde::{Deserialize, Serialize};
use shared::cart::Cart;
use shared::models::{Actor, Member};
use std::fmt;
use std::sync::Arc;

pub const SESSION_KEY: &str = "session_id";
pub const MEMBER_KEY: &str = "member";
pub const TOKEN_KEY: &str = "auth_token";

/// Anonymous, durable identifier of one client installation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reuse the stored id, or create and persist a new one
    pub fn load_or_create(store: &dyn KeyValueStore) -> Self {
        match store.get(SESSION_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => return Self(id),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read session id"),
        }

        let id = Self::generate();
        if let Err(e) = store.set(SESSION_KEY, id.as_str()) {
            // Still usable for this run; the next start gets a fresh id
            tracing::warn!(error = %e, "Failed to persist session id");
        }
        tracing::info!(session_id = %id, "New session created");
        id
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application context
pub struct AppContext {
    store: Arc<dyn KeyValueStore>,
    session_id: SessionId,
    member: Option<Member>,
    token: Option<String>,
    cart: Cart,
    reporter: Option<Arc<dyn ViewReporter>>,
}

impl AppContext {
    /// Build the context from persisted state
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let session_id = SessionId::load_or_create(store.as_ref());

        let member = store.get_json::<Member>(MEMBER_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable cached member");
            None
        });
        let token = store.get(TOKEN_KEY).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read cached token");
            None
        });

        Self {
            store,
            session_id,
            member,
            token,
            cart: Cart::new(),
            reporter: None,
        }
    }

    /// Forward counted views to `reporter`
    pub fn with_reporter(mut self, reporter: Arc<dyn ViewReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.member.is_some()
    }

    pub fn actor(&self) -> Actor {
        Actor::from_member(self.member.as_ref())
    }

    /// Record a signed-in member and persist it
    pub fn sign_in(&mut self, member: Member, token: Option<String>) {
        if let Err(e) = self.store.set_json(MEMBER_KEY, &member) {
            tracing::warn!(error = %e, "Failed to cache member");
        }
        let token_result = match &token {
            Some(t) => self.store.set(TOKEN_KEY, t),
            None => self.store.remove(TOKEN_KEY),
        };
        if let Err(e) = token_result {
            tracing::warn!(error = %e, "Failed to cache token");
        }

        tracing::info!(member_id = %member.id, "Member signed in");
        self.member = Some(member);
        self.token = token;
    }

    /// Forget the member and token. The session id and view history stay.
    pub fn sign_out(&mut self) {
        for key in [MEMBER_KEY, TOKEN_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "Failed to clear cached auth data");
            }
        }
        if let Some(member) = self.member.take() {
            tracing::info!(member_id = %member.id, "Member signed out");
        }
        self.token = None;
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// View counter bound to this session and the current actor
    pub fn view_counter(&self) -> ViewCounter {
        let counter = ViewCounter::new(self.store.clone(), self.session_id.clone())
            .with_actor(self.actor());
        match &self.reporter {
            Some(reporter) => counter.with_reporter(reporter.clone()),
            None => counter,
        }
    }
}
