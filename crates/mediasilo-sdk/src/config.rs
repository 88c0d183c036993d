/*
[INPUT]:  YAML configuration file
[OUTPUT]: Client configuration plus validated credentials
[POS]:    Configuration layer - SDK setup from disk
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::auth::{CredentialParts, Credentials};
use crate::http::{ApiError, ClientConfig, MediaSiloClient, Result};

/// Top-level configuration for an SDK client
///
/// ```yaml
/// base_url: https://api.mediasilo.com/v3/
/// timeout_secs: 30
/// credentials:
///   username: editor
///   password: secret
///   hostname: studio
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SdkConfig {
    /// Overrides any base URL implied by the credentials
    #[serde(default)]
    pub base_url: Option<String>,
    /// Whole-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Exactly one credential variant's fields
    #[serde(default)]
    pub credentials: CredentialParts,
}

impl SdkConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ApiError::Configuration(format!("invalid config: {e}")))
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout = Duration::from_secs(secs);
        }
        config.base_url = self.base_url.clone();
        config
    }

    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::from_parts(self.credentials.clone())
    }

    /// Build a ready-to-use client. No login happens here.
    pub fn into_client(self) -> Result<MediaSiloClient> {
        let credentials = self.credentials()?;
        MediaSiloClient::with_config(credentials, self.client_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthScheme;

    #[test]
    fn test_password_config() {
        let config = SdkConfig::from_yaml_str(
            r#"
timeout_secs: 5
credentials:
  username: editor
  password: hunter2
  hostname: studio
"#,
        )
        .unwrap();

        let client_config = config.client_config();
        assert_eq!(client_config.timeout, Duration::from_secs(5));
        assert_eq!(client_config.connect_timeout, Duration::from_secs(10));
        assert!(client_config.base_url.is_none());

        let creds = config.credentials().unwrap();
        assert_eq!(creds.scheme(), AuthScheme::Session);
        assert_eq!(creds.username(), Some("editor"));
    }

    #[test]
    fn test_signed_config_builds_client() {
        let client = SdkConfig::from_yaml_str(
            r#"
base_url: https://staging.example/v3
credentials:
  consumer_key: K
  consumer_secret: S
"#,
        )
        .unwrap()
        .into_client()
        .unwrap();

        assert_eq!(client.base_url().as_str(), "https://staging.example/v3/");
        assert_eq!(client.credentials().consumer_key(), Some("K"));
    }

    #[test]
    fn test_signed_credentials_base_url_reaches_client() {
        let client = SdkConfig::from_yaml_str(
            r#"
credentials:
  consumer_key: K
  consumer_secret: S
  base_url: https://staging.example/v3
"#,
        )
        .unwrap()
        .into_client()
        .unwrap();

        assert_eq!(client.base_url().as_str(), "https://staging.example/v3/");
    }

    #[test]
    fn test_mixed_credentials_rejected() {
        let config = SdkConfig::from_yaml_str(
            r#"
credentials:
  session_token: T
  hostname: studio
  consumer_secret: S
"#,
        )
        .unwrap();
        assert!(matches!(config.credentials(), Err(ApiError::Configuration(_))));
    }

    #[test]
    fn test_invalid_yaml_is_configuration_error() {
        let err = SdkConfig::from_yaml_str("timeout_secs: [").unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SdkConfig::from_file("/nonexistent/mediasilo.yaml").unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }
}
