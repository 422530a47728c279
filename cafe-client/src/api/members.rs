//! Member service

use crate::{ClientResult, HttpClient};
use shared::error::ApiResponse;
use shared::models::{LoginResponse, MemberLogin, MemberSignup};
use validator::Validate;

impl HttpClient {
    /// Register a member. The form is validated before any request is sent.
    pub async fn signup(&self, form: &MemberSignup) -> ClientResult<LoginResponse> {
        form.validate()?;
        let response: ApiResponse<LoginResponse> = self.post("/member/signup", form).await?;
        Self::into_data(response, "signup")
    }

    /// Log a member in. The form is validated before any request is sent.
    pub async fn login(&self, form: &MemberLogin) -> ClientResult<LoginResponse> {
        form.validate()?;
        let response: ApiResponse<LoginResponse> = self.post("/member/login", form).await?;
        Self::into_data(response, "login")
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.post_empty::<ApiResponse<serde_json::Value>>("/member/logout")
            .await?
            .into_result()?;
        self.set_token(None);
        Ok(())
    }
}
