/*
[INPUT]:  Password credentials and the session endpoint
[OUTPUT]: Established, replaced or terminated sessions
[POS]:    HTTP layer - credential exchange (login/logout)
[UPDATE]: When the session endpoint or login payload changes
*/

// ### Session Endpoints

use secrecy::ExposeSecret;

use crate::auth::{AuthScheme, Credentials, Session};
use crate::http::paths;
use crate::http::request::Request;
use crate::http::translate::translate;
use crate::http::{ApiError, MediaSiloClient, Result};
use crate::types::{LoginRequest, LoginResponse};

impl MediaSiloClient {
    /// Log in now instead of on the first authenticated call
    ///
    /// POST /session
    pub async fn login(&self) -> Result<Session> {
        self.require_session_scheme()?;
        self.ensure_session().await
    }

    /// Drop the current session and perform a fresh credential exchange
    pub async fn reauthenticate(&self) -> Result<Session> {
        self.require_session_scheme()?;
        self.store().sessions().clear();
        self.ensure_session().await
    }

    /// End the current session on the service and forget it locally.
    ///
    /// The DELETE carries the session held when the call started, so logout
    /// never triggers a login. A session installed meanwhile is kept.
    ///
    /// DELETE /session
    pub async fn logout(&self) -> Result<()> {
        self.require_session_scheme()?;
        let Some(session) = self.session() else {
            return Ok(());
        };

        let signed = self
            .signer()
            .sign(Request::delete(paths::SESSION), Some(&session))?;
        let result = self.send(&signed).await.and_then(translate);
        if self.store().sessions().invalidate(&session) {
            tracing::info!("session closed");
        }
        result.map(|_| ())
    }

    pub(crate) async fn login_exchange(&self) -> Result<Session> {
        let Credentials::Password {
            username,
            password,
            hostname,
            ..
        } = self.credentials()
        else {
            return Err(ApiError::Unauthenticated);
        };

        tracing::info!(username = %username, hostname = %hostname, "logging in");

        let body = LoginRequest {
            username,
            password: password.expose_secret(),
            hostname,
        };
        let request = Request::post(paths::SESSION).json(&body)?.public();
        let signed = self.signer().sign(request, None)?;
        let response = translate(self.send(&signed).await?)?;
        let login: LoginResponse = response.json()?;

        tracing::info!(
            user_id = login.user.as_ref().map(|u| u.id.as_str()).unwrap_or("-"),
            "session established"
        );
        Ok(Session::new(login.session, login.user))
    }

    fn require_session_scheme(&self) -> Result<()> {
        match self.store().scheme() {
            AuthScheme::Session => Ok(()),
            AuthScheme::Signed => Err(ApiError::Configuration(
                "signed-request credentials do not hold a session".to_string(),
            )),
        }
    }
}
