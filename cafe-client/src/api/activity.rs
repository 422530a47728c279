//! Activity tracking service

use crate::{ClientResult, HttpClient};
use shared::error::ApiResponse;
use shared::models::ActivityEvent;

impl HttpClient {
    /// Record an activity event
    pub async fn track(&self, event: &ActivityEvent) -> ClientResult<()> {
        self.post::<ApiResponse<serde_json::Value>, _>("/activity/track", event)
            .await?
            .into_result()?;
        Ok(())
    }
}
