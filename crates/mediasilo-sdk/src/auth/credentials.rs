/*
[INPUT]:  Username/password/host, consumer key/secret, or a session token
[OUTPUT]: Validated, immutable credential variant for one client
[POS]:    Auth layer - credential definitions and construction rules
[UPDATE]: When adding credential variants or changing validation
*/

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::http::{ApiError, Result};

/// Production root of the MediaSilo v3 API
pub const DEFAULT_BASE_URL: &str = "https://api.mediasilo.com/v3/";

/// Authentication scheme implied by a credential variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Session token obtained from (or supplied instead of) a login exchange
    Session,
    /// Per-request HMAC signature with consumer key/secret
    Signed,
}

/// Credentials for one client instance. Exactly one variant is active.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Exchanged once for a session token
    Password {
        username: String,
        password: SecretString,
        hostname: String,
        base_url: String,
    },
    /// Every request is signed, no session is held
    Signed {
        consumer_key: String,
        consumer_secret: SecretString,
        base_url: String,
    },
    /// A session established elsewhere
    Session {
        session_token: SecretString,
        hostname: String,
        base_url: String,
    },
}

impl Credentials {
    /// Password grant against the production API
    pub fn password(
        username: impl Into<String>,
        password: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Result<Self> {
        Self::password_with_base_url(username, password, hostname, DEFAULT_BASE_URL)
    }

    /// Password grant against an explicit base URL
    pub fn password_with_base_url(
        username: impl Into<String>,
        password: impl Into<String>,
        hostname: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let username = required("username", username.into())?;
        let password = required("password", password.into())?;
        let hostname = required("hostname", hostname.into())?;
        let base_url = required("base_url", base_url.into())?;

        Ok(Credentials::Password {
            username,
            password: SecretString::from(password),
            hostname,
            base_url,
        })
    }

    /// Signed-request grant against the production API
    pub fn signed(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
        Self::signed_with_base_url(consumer_key, consumer_secret, DEFAULT_BASE_URL)
    }

    /// Signed-request grant against an explicit base URL
    pub fn signed_with_base_url(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let consumer_key = required("consumer_key", consumer_key.into())?;
        let consumer_secret = required("consumer_secret", consumer_secret.into())?;
        let base_url = required("base_url", base_url.into())?;

        Ok(Credentials::Signed {
            consumer_key,
            consumer_secret: SecretString::from(consumer_secret),
            base_url,
        })
    }

    /// Pre-established session against the production API
    pub fn session(session_token: impl Into<String>, hostname: impl Into<String>) -> Result<Self> {
        Self::session_with_base_url(session_token, hostname, DEFAULT_BASE_URL)
    }

    /// Pre-established session against an explicit base URL
    pub fn session_with_base_url(
        session_token: impl Into<String>,
        hostname: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let session_token = required("session_token", session_token.into())?;
        let hostname = required("hostname", hostname.into())?;
        let base_url = required("base_url", base_url.into())?;

        Ok(Credentials::Session {
            session_token: SecretString::from(session_token),
            hostname,
            base_url,
        })
    }

    /// Resolve a loose set of fields into exactly one variant.
    ///
    /// Mixing fields of different variants is rejected rather than guessed.
    pub fn from_parts(parts: CredentialParts) -> Result<Self> {
        let CredentialParts {
            username,
            password,
            hostname,
            base_url,
            consumer_key,
            consumer_secret,
            session_token,
        } = parts;

        let has_password_grant = username.is_some() || password.is_some();
        let has_signed = consumer_key.is_some() || consumer_secret.is_some();
        let has_session = session_token.is_some();

        let active = [has_password_grant, has_signed, has_session]
            .iter()
            .filter(|present| **present)
            .count();
        if active == 0 {
            return Err(ApiError::Configuration("no credentials supplied".to_string()));
        }
        if active > 1 {
            return Err(ApiError::Configuration(
                "contradictory credentials: supply exactly one of username/password, \
                 consumer key/secret, or session token"
                    .to_string(),
            ));
        }

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if has_signed {
            if hostname.is_some() {
                return Err(ApiError::Configuration(
                    "hostname is not used with signed-request credentials".to_string(),
                ));
            }
            return Self::signed_with_base_url(
                consumer_key.unwrap_or_default(),
                exposed(consumer_secret),
                base_url,
            );
        }

        let hostname = hostname.unwrap_or_default();
        if has_session {
            return Self::session_with_base_url(exposed(session_token), hostname, base_url);
        }

        Self::password_with_base_url(
            username.unwrap_or_default(),
            exposed(password),
            hostname,
            base_url,
        )
    }

    /// Which scheme this variant authenticates with
    pub fn scheme(&self) -> AuthScheme {
        match self {
            Credentials::Signed { .. } => AuthScheme::Signed,
            Credentials::Password { .. } | Credentials::Session { .. } => AuthScheme::Session,
        }
    }

    /// Host context sent with session-based requests
    pub fn hostname(&self) -> Option<&str> {
        match self {
            Credentials::Password { hostname, .. } | Credentials::Session { hostname, .. } => {
                Some(hostname)
            }
            Credentials::Signed { .. } => None,
        }
    }

    /// Base URL carried by the credentials
    pub fn base_url(&self) -> Option<&str> {
        match self {
            Credentials::Password { base_url, .. }
            | Credentials::Session { base_url, .. }
            | Credentials::Signed { base_url, .. } => Some(base_url),
        }
    }

    /// Username of a password grant
    pub fn username(&self) -> Option<&str> {
        match self {
            Credentials::Password { username, .. } => Some(username),
            _ => None,
        }
    }

    /// Consumer key of a signed-request grant
    pub fn consumer_key(&self) -> Option<&str> {
        match self {
            Credentials::Signed { consumer_key, .. } => Some(consumer_key),
            _ => None,
        }
    }

    /// Whether a login exchange can be performed with these credentials
    pub fn can_login(&self) -> bool {
        matches!(self, Credentials::Password { .. })
    }
}

/// Unvalidated credential fields, as read from a config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialParts {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub consumer_key: Option<String>,
    #[serde(default)]
    pub consumer_secret: Option<SecretString>,
    #[serde(default)]
    pub session_token: Option<SecretString>,
}

fn required(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(ApiError::Configuration(format!("{field} must not be empty")))
    } else {
        Ok(value)
    }
}

fn exposed(secret: Option<SecretString>) -> String {
    secret
        .map(|s| s.expose_secret().to_string())
        .unwrap_or_default()
}
