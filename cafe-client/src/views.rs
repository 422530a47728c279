//! Product view counting
//!
//! A view is counted at most once per (session, product). The displayed
//! count is reconciled from two sources without a merge protocol:
//!
//! ```text
//! baseline = max(server_views, local_views)
//! first view in this session  -> baseline + 1, persisted, reported
//! any later view              -> baseline, no write, no report
//! marker write fails          -> baseline, not counted, no report
//! ```
//!
//! Reporting to the backend is fire-and-forget on a spawned task. Its
//! failures are logged at debug level and never reach the caller.

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::SessionId;
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use shared::models::{ActivityEvent, Actor};
use std::sync::Arc;

const VIEWED_MARKER: &str = "1";

fn count_key(product_id: &str) -> String {
    format!("views:{}", product_id)
}

fn viewed_key(session: &SessionId, product_id: &str) -> String {
    format!("viewed:{}:{}", session, product_id)
}

/// Result of opening a product detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOutcome {
    /// Count to display
    pub views: u64,
    /// Whether this call incremented the count
    pub counted: bool,
}

/// A counted view, handed to the [`ViewReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEvent {
    pub product_id: String,
    pub session_id: SessionId,
    pub actor: Actor,
    /// Count after the increment
    pub views: u64,
}

/// Destination for counted views
#[async_trait]
pub trait ViewReporter: Send + Sync {
    async fn report(&self, event: &ViewEvent) -> ClientResult<()>;
}

/// Reports views to the product and activity services
#[derive(Debug, Clone)]
pub struct HttpViewReporter {
    http: HttpClient,
}

impl HttpViewReporter {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ViewReporter for HttpViewReporter {
    async fn report(&self, event: &ViewEvent) -> ClientResult<()> {
        // The increment endpoint is optional on the backend
        let increment = match self.http.increment_view(&event.product_id).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => other,
        };

        let activity = ActivityEvent::view(event.product_id.clone(), event.actor.clone());
        let tracked = self.http.track(&activity).await;

        increment.and(tracked)
    }
}

/// View counter for one session
pub struct ViewCounter {
    store: Arc<dyn KeyValueStore>,
    session_id: SessionId,
    actor: Actor,
    reporter: Option<Arc<dyn ViewReporter>>,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn KeyValueStore>, session_id: SessionId) -> Self {
        Self {
            store,
            session_id,
            actor: Actor::Anonymous,
            reporter: None,
        }
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ViewReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Locally persisted count for a product, 0 when absent or unreadable
    pub fn local_views(&self, product_id: &str) -> u64 {
        match self.store.get(&count_key(product_id)) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(product_id, raw = %raw, "Ignoring malformed cached view count");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(product_id, error = %e, "Failed to read cached view count");
                0
            }
        }
    }

    /// Whether this session already counted a view of the product
    pub fn has_viewed(&self, product_id: &str) -> bool {
        match self.store.get(&viewed_key(&self.session_id, product_id)) {
            Ok(marker) => marker.is_some(),
            Err(e) => {
                tracing::warn!(product_id, error = %e, "Failed to read viewed marker");
                false
            }
        }
    }

    /// Register that the product's detail view was opened
    pub fn record_view(&self, product_id: &str, server_views: u64) -> ViewOutcome {
        let baseline = server_views.max(self.local_views(product_id));

        if self.has_viewed(product_id) {
            tracing::trace!(product_id, views = baseline, "View already counted");
            return ViewOutcome {
                views: baseline,
                counted: false,
            };
        }

        let views = baseline.saturating_add(1);
        let marker_key = viewed_key(&self.session_id, product_id);
        let views_key = count_key(product_id);
        let count = views.to_string();

        // Marker first: a partial write may lose a view but never doubles one
        let entries = [
            (marker_key.as_str(), VIEWED_MARKER),
            (views_key.as_str(), count.as_str()),
        ];
        if let Err(e) = self.store.set_many(&entries) {
            // Without a stored marker a reopen would count again
            tracing::warn!(product_id, error = %e, "Failed to persist view, not counted");
            return ViewOutcome {
                views: baseline,
                counted: false,
            };
        }

        tracing::debug!(product_id, views, session_id = %self.session_id, "View counted");

        self.spawn_report(ViewEvent {
            product_id: product_id.to_string(),
            session_id: self.session_id.clone(),
            actor: self.actor.clone(),
            views,
        });

        ViewOutcome {
            views,
            counted: true,
        }
    }

    fn spawn_report(&self, event: ViewEvent) {
        let Some(reporter) = self.reporter.clone() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = reporter.report(&event).await {
                        tracing::debug!(
                            product_id = %event.product_id,
                            error = %e,
                            "View report failed"
                        );
                    }
                });
            }
            Err(_) => {
                tracing::debug!(product_id = %event.product_id, "No async runtime, view not reported");
            }
        }
    }
}
