//! Member signup, login and logout against an [`AppContext`]

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::session::AppContext;
use shared::models::{LoginResponse, Member, MemberLogin, MemberSignup};

/// Drives the member services and keeps the context in sync
#[derive(Debug, Clone)]
pub struct AuthFlow {
    http: HttpClient,
}

impl AuthFlow {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Reuse a token cached by an earlier run
    pub fn restore(&mut self, ctx: &AppContext) {
        self.http.set_token(ctx.token().map(str::to_string));
    }

    /// Register and sign in. Invalid forms fail before any request.
    pub async fn signup(&mut self, ctx: &mut AppContext, form: &MemberSignup) -> ClientResult<Member> {
        let response = self.http.signup(form).await.inspect_err(log_failure("signup"))?;
        Ok(self.accept(ctx, response))
    }

    /// Sign in. Invalid forms fail before any request.
    pub async fn login(&mut self, ctx: &mut AppContext, form: &MemberLogin) -> ClientResult<Member> {
        let response = self.http.login(form).await.inspect_err(log_failure("login"))?;
        Ok(self.accept(ctx, response))
    }

    /// Sign out locally even when the backend call fails
    pub async fn logout(&mut self, ctx: &mut AppContext) {
        if let Err(e) = self.http.logout().await {
            tracing::warn!(error = %e, "Backend logout failed, clearing local session anyway");
            self.http.set_token(None);
        }
        ctx.sign_out();
    }

    fn accept(&mut self, ctx: &mut AppContext, response: LoginResponse) -> Member {
        let LoginResponse { member, token } = response;
        self.http.set_token(token.clone());
        ctx.sign_in(member.clone(), token);
        member
    }
}

fn log_failure(action: &'static str) -> impl Fn(&ClientError) {
    move |e| {
        if e.is_validation() {
            tracing::debug!(action, error = %e, "Form rejected");
        } else {
            tracing::warn!(action, error = %e, "Member request failed");
        }
    }
}
