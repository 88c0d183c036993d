/*
[INPUT]:  HTTP configuration (base URL, timeouts) and credentials
[OUTPUT]: Authenticated, translated responses for every API call
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{
    AuthScheme, AuthStatus, CredentialStore, Credentials, DEFAULT_BASE_URL, Session,
};
use crate::http::request::{Request, Response, SignedRequest};
use crate::http::signature::RequestSigner;
use crate::http::translate::translate;
use crate::http::{ApiError, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Overrides the base URL carried by the credentials
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            base_url: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Main HTTP client for the MediaSilo API.
///
/// Safe to share between tasks; wrap it in an `Arc` to do so.
#[derive(Debug)]
pub struct MediaSiloClient {
    http_client: Client,
    base_url: Url,
    store: CredentialStore,
    signer: RequestSigner,
}

impl MediaSiloClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let base_url = config
            .base_url
            .as_deref()
            .or_else(|| credentials.base_url())
            .unwrap_or(DEFAULT_BASE_URL);

        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
            signer: RequestSigner::new(&credentials),
            store: CredentialStore::new(credentials),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        self.store.credentials()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current session, if one is established
    pub fn session(&self) -> Option<Session> {
        self.store.session()
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.store.auth_status()
    }

    /// Install a session obtained elsewhere, replacing the current one
    pub fn adopt_session(&self, session: Session) {
        self.store.adopt_session(session);
    }

    pub(crate) fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub(crate) fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// GET a path with optional query parameters
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response> {
        self.execute(Request::get(path).queries(query.iter().copied()))
            .await
    }

    /// POST a JSON body
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.execute(Request::post(path).json(body)?).await
    }

    /// PUT a JSON body
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.execute(Request::put(path).json(body)?).await
    }

    /// DELETE a path
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.execute(Request::delete(path)).await
    }

    /// GET and decode the body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        self.get(path, query).await?.json()
    }

    /// POST and decode the body
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post(path, body).await?.json()
    }

    /// PUT and decode the body
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put(path, body).await?.json()
    }

    /// Authenticate, sign, send and translate a single request.
    ///
    /// At most one network attempt is made for the request itself; a login
    /// exchange may precede it in session mode.
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let session = match self.store.scheme() {
            AuthScheme::Session if request.requires_auth => Some(self.ensure_session().await?),
            _ => None,
        };

        let signed = self.signer.sign(request, session.as_ref())?;
        let response = self.send(&signed).await?;

        let result = translate(response);
        if let (Err(ApiError::Unauthorized { .. }), Some(used)) = (&result, &signed.session) {
            if self.store.sessions().invalidate(used) {
                tracing::warn!(
                    path = %signed.request.path,
                    "session rejected, next call will re-authenticate"
                );
            }
        }
        result
    }

    /// Session for the next request, logging in if there is none yet
    pub(crate) async fn ensure_session(&self) -> Result<Session> {
        self.store
            .sessions()
            .get_or_login(|| self.login_exchange())
            .await
    }

    pub(crate) async fn send(&self, signed: &SignedRequest) -> Result<Response> {
        let request = &signed.request;
        let mut url = self.url(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        tracing::debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = self.http_client.request(request.method.clone(), url);
        for (name, value) in &signed.auth_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(path = %request.path, error = %e, "network failure");
            ApiError::from(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "received response"
        );

        Ok(Response::new(status, headers, body))
    }

    /// Build full URL for a resource path
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("https://api.mediasilo.com/v3").unwrap();
        assert_eq!(url.as_str(), "https://api.mediasilo.com/v3/");
    }

    #[test]
    fn test_url_joins_under_base_path() {
        let client = MediaSiloClient::new(Credentials::signed("K", "S").unwrap()).unwrap();
        let url = client.url("/projects/123").unwrap();
        assert_eq!(url.as_str(), "https://api.mediasilo.com/v3/projects/123");
    }

    #[test]
    fn test_config_base_url_overrides_credentials() {
        let creds = Credentials::password_with_base_url("u", "p", "h", "https://a.example/v3/")
            .unwrap();
        let client = MediaSiloClient::with_config(
            creds,
            ClientConfig::default().with_base_url("https://b.example/v3/"),
        )
        .unwrap();
        assert_eq!(client.base_url().as_str(), "https://b.example/v3/");
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let creds = Credentials::password_with_base_url("u", "p", "h", "not a url").unwrap();
        let err = MediaSiloClient::new(creds).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }
}
