/*
[INPUT]:  Error sources (transport, status codes, serialization, configuration)
[OUTPUT]: Structured error types with classification and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation message returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

/// Detail carried by a validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationDetails {
    /// Field-level messages parsed from a structured body
    Fields(Vec<FieldError>),
    /// Body that could not be broken down into fields
    Raw(String),
}

impl ValidationDetails {
    /// Field errors, empty when the body was unstructured
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ValidationDetails::Fields(fields) => fields,
            ValidationDetails::Raw(_) => &[],
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationDetails::Fields(fields) => {
                let joined = fields
                    .iter()
                    .map(|e| match &e.field {
                        Some(field) => format!("{field}: {}", e.message),
                        None => e.message.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                f.write_str(&joined)
            }
            ValidationDetails::Raw(body) => f.write_str(body),
        }
    }
}

/// Coarse grouping of errors by what the caller should do about them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was wrong; fix the input
    Input,
    /// Credentials missing, rejected or insufficient
    Auth,
    /// Retry later, possibly after a delay
    Transient,
    /// Misconfiguration or a client/service contract mismatch
    Fatal,
}

/// Main error type for the MediaSilo SDK
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Invalid credentials, base URL or config file
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A session was required but none has been established
    #[error("No session established, log in first")]
    Unauthenticated,

    /// The service rejected the credentials or session (401)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated, but not permitted (403)
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// The addressed resource does not exist (404)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The service refused the payload (400/422)
    #[error("Validation failed (status {status}): {details}")]
    ValidationFailed {
        status: u16,
        details: ValidationDetails,
    },

    /// Too many requests (429)
    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// 5xx, or any status the translator does not classify
    #[error("Server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Connection, DNS or timeout failure before a response arrived
    #[error("Network failure: {0}")]
    NetworkFailure(#[source] Arc<reqwest::Error>),

    /// A successful response whose body could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Classify the error for the caller
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::ValidationFailed { .. } | ApiError::NotFound { .. } => ErrorClass::Input,
            ApiError::Unauthenticated
            | ApiError::Unauthorized { .. }
            | ApiError::Forbidden { .. } => ErrorClass::Auth,
            ApiError::RateLimited { .. } | ApiError::NetworkFailure(_) => ErrorClass::Transient,
            ApiError::ServerError { status, .. } if *status >= 500 => ErrorClass::Transient,
            ApiError::ServerError { .. } => ErrorClass::Input,
            ApiError::Configuration(_)
            | ApiError::MalformedResponse(_)
            | ApiError::Serialization(_) => ErrorClass::Fatal,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Transient
    }

    /// Get the retry delay hinted by the service (if any)
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            ApiError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        self.class() == ErrorClass::Auth
    }

    /// Check if the network failure was a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::NetworkFailure(e) if e.is_timeout())
    }

    /// HTTP status behind the error, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::ValidationFailed { status, .. } | ApiError::ServerError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Create a status error for codes without a dedicated variant
    pub fn server_error(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::ServerError {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::NetworkFailure(Arc::new(err))
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Configuration(format!("invalid URL: {err}"))
    }
}

/// Result type alias for MediaSilo operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let rate_limited = ApiError::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
        };
        assert!(rate_limited.is_retryable());
        assert_eq!(rate_limited.retry_delay(), Some(Duration::from_secs(30)));

        let unauthorized = ApiError::Unauthorized {
            message: "bad session".to_string(),
        };
        assert!(!unauthorized.is_retryable());
        assert!(unauthorized.is_auth_error());
    }

    #[test]
    fn test_error_class() {
        assert_eq!(ApiError::server_error(StatusCode::BAD_GATEWAY, "").class(), ErrorClass::Transient);
        assert_eq!(ApiError::server_error(StatusCode::CONFLICT, "").class(), ErrorClass::Input);
        assert_eq!(ApiError::Configuration("x".to_string()).class(), ErrorClass::Fatal);
        assert_eq!(ApiError::MalformedResponse("x".to_string()).class(), ErrorClass::Fatal);
        assert_eq!(ApiError::Unauthenticated.class(), ErrorClass::Auth);
        assert_eq!(
            ApiError::NotFound { message: String::new() }.class(),
            ErrorClass::Input
        );
    }

    #[test]
    fn test_server_error_keeps_literal_status() {
        let err = ApiError::server_error(StatusCode::IM_A_TEAPOT, "short and stout");
        match &err {
            ApiError::ServerError { status, message } => {
                assert_eq!(*status, 418);
                assert_eq!(message, "short and stout");
            }
            _ => panic!("Expected ServerError variant"),
        }
        assert_eq!(err.status(), Some(418));
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::Fields(vec![
            FieldError {
                field: Some("title".to_string()),
                message: "required".to_string(),
            },
            FieldError {
                field: None,
                message: "too many assets".to_string(),
            },
        ]);
        assert_eq!(details.to_string(), "title: required; too many assets");
        assert!(ValidationDetails::Raw("nope".to_string()).fields().is_empty());

        let err = ApiError::ValidationFailed {
            status: 422,
            details,
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.class(), ErrorClass::Input);
        assert_eq!(
            err.to_string(),
            "Validation failed (status 422): title: required; too many assets"
        );
    }
}
