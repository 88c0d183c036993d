/*
[INPUT]:  Hostname/username for a reset, reset tokens and new passwords
[OUTPUT]: Reset request ids, token representations and redirect targets
[POS]:    HTTP layer - password reset endpoints (no session required)
[UPDATE]: When the reset flow or its payloads change
*/

// ### Password Reset Endpoints

use crate::http::paths;
use crate::http::request::Request;
use crate::http::{MediaSiloClient, Result};
use crate::types::{CreatedResponse, PasswordReset, PasswordResetOutcome, PasswordResetRequest};

impl MediaSiloClient {
    /// Email a reset link to the user. Returns the reset request id.
    ///
    /// POST /passwordreset
    pub async fn initiate_password_reset(&self, request: &PasswordResetRequest) -> Result<String> {
        let request = Request::post(paths::PASSWORD_RESET).json(request)?.public();
        let created: CreatedResponse = self.execute(request).await?.json()?;
        Ok(created.id)
    }

    /// Check that a reset token is still valid
    ///
    /// GET /passwordreset/{token}
    pub async fn validate_reset_token(&self, token: &str) -> Result<serde_json::Value> {
        let request = Request::get(paths::password_reset_token(token)).public();
        self.execute(request).await?.json()
    }

    /// Set a new password for the user holding `token`
    ///
    /// PUT /passwordreset
    pub async fn process_password_reset(&self, token: &str, password: &str) -> Result<PasswordResetOutcome> {
        let body = PasswordReset { token, password };
        let request = Request::put(paths::PASSWORD_RESET).json(&body)?.public();
        self.execute(request).await?.json()
    }
}
