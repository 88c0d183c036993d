/*
[INPUT]:  Normalized HTTP responses (status, headers, raw body)
[OUTPUT]: The response untouched on 2xx, otherwise a typed ApiError
[POS]:    HTTP layer - status code and error body translation
[UPDATE]: When the service adds error shapes or status conventions
*/

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::Deserialize;

use crate::http::request::Response;
use crate::http::{ApiError, FieldError, Result, ValidationDetails};

/// Longest body excerpt carried in an error message
const MAX_MESSAGE_LEN: usize = 512;

#[derive(Debug, Deserialize)]
struct ErrorsBody {
    errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Pass successful responses through; turn everything else into an error
pub fn translate(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.body();
    let err = match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized {
            message: error_message(body),
        },
        StatusCode::FORBIDDEN => ApiError::Forbidden {
            message: error_message(body),
        },
        StatusCode::NOT_FOUND => ApiError::NotFound {
            message: error_message(body),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::ValidationFailed {
            status: status.as_u16(),
            details: validation_details(body),
        },
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            retry_after: parse_retry_after(response.headers()),
        },
        _ => ApiError::server_error(status, error_message(body)),
    };

    tracing::debug!(status = status.as_u16(), error = %err, "request failed");
    Err(err)
}

/// Read `Retry-After` as delta-seconds or an HTTP-date
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date = DateTime::parse_from_rfc2822(value).ok()?;
    let delta = date.with_timezone(&Utc) - Utc::now();
    Some(delta.to_std().unwrap_or(Duration::ZERO))
}

/// Break a 400/422 body into field errors when it is structured
pub fn validation_details(body: &str) -> ValidationDetails {
    if let Ok(parsed) = serde_json::from_str::<ErrorsBody>(body) {
        if !parsed.errors.is_empty() {
            return ValidationDetails::Fields(parsed.errors);
        }
    }
    if let Ok(parsed) = serde_json::from_str::<Vec<FieldError>>(body) {
        if !parsed.is_empty() {
            return ValidationDetails::Fields(parsed);
        }
    }
    if let Ok(parsed) = serde_json::from_str::<MessageBody>(body) {
        return ValidationDetails::Fields(vec![FieldError {
            field: None,
            message: truncate(&parsed.message),
        }]);
    }
    ValidationDetails::Raw(truncate(body))
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<MessageBody>(body) {
        Ok(parsed) => truncate(&parsed.message),
        Err(_) => truncate(body),
    }
}

/// Cap at `MAX_MESSAGE_LEN` characters, marking the cut with "..."
fn truncate(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use reqwest::header::HeaderValue;
    use rstest::rstest;

    fn response(status: u16, body: &str) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            body,
        )
    }

    #[rstest]
    #[case(200)]
    #[case(201)]
    #[case(204)]
    fn test_success_passes_through(#[case] status: u16) {
        let translated = translate(response(status, "{}")).unwrap();
        assert_eq!(translated.status().as_u16(), status);
    }

    #[rstest]
    #[case(401, 401)]
    #[case(403, 403)]
    #[case(404, 404)]
    #[case(400, 400)]
    #[case(409, 409)]
    #[case(418, 418)]
    #[case(422, 422)]
    #[case(500, 500)]
    #[case(503, 503)]
    fn test_status_is_preserved(#[case] status: u16, #[case] expected: u16) {
        let err = translate(response(status, "nope")).unwrap_err();
        assert_eq!(err.status(), Some(expected));
    }

    #[test]
    fn test_status_variants() {
        assert!(matches!(
            translate(response(401, "")).unwrap_err(),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            translate(response(403, "")).unwrap_err(),
            ApiError::Forbidden { .. }
        ));
        assert!(matches!(
            translate(response(404, r#"{"message":"no such project"}"#)).unwrap_err(),
            ApiError::NotFound { message } if message == "no such project"
        ));
        assert!(matches!(
            translate(response(502, "bad gateway")).unwrap_err(),
            ApiError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_validation_field_errors() {
        let err = translate(response(
            422,
            r#"{"errors":[{"field":"title","message":"required"}]}"#,
        ))
        .unwrap_err();

        match err {
            ApiError::ValidationFailed { status, details } => {
                assert_eq!(status, 422);
                assert_eq!(
                    details.fields(),
                    &[FieldError {
                        field: Some("title".to_string()),
                        message: "required".to_string(),
                    }]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_raw_body() {
        let err = translate(response(400, "title is missing")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::ValidationFailed { status: 400, details: ValidationDetails::Raw(body) }
                if body == "title is missing"
        ));
    }

    #[test]
    fn test_validation_message_body() {
        let details = validation_details(r#"{"message":"bad date"}"#);
        assert_eq!(details.fields()[0].message, "bad date");
        assert!(details.fields()[0].field.is_none());
    }

    #[test]
    fn test_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        let err = translate(Response::new(StatusCode::TOO_MANY_REQUESTS, headers, "")).unwrap_err();
        assert!(matches!(
            err,
            ApiError::RateLimited { retry_after: Some(d) } if d == Duration::from_secs(30)
        ));
    }

    #[test]
    fn test_retry_after_missing() {
        let err = translate(response(429, "")).unwrap_err();
        assert!(matches!(err, ApiError::RateLimited { retry_after: None }));
    }

    #[test]
    fn test_retry_after_http_date() {
        let future = (Utc::now() + chrono::Duration::seconds(120)).to_rfc2822();
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_str(&future).unwrap());
        let delay = parse_retry_after(&headers).unwrap();
        assert!(delay <= Duration::from_secs(120));
        assert!(delay >= Duration::from_secs(100));

        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), Some(Duration::ZERO));
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(2 * MAX_MESSAGE_LEN);
        match translate(response(500, &body)).unwrap_err() {
            ApiError::ServerError { message, .. } => {
                assert_eq!(message.len(), MAX_MESSAGE_LEN + 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    #[case(403)]
    #[case(404)]
    #[case(500)]
    fn test_long_json_messages_are_truncated(#[case] status: u16) {
        let body = serde_json::json!({ "message": "é".repeat(3 * MAX_MESSAGE_LEN) }).to_string();
        let err = translate(response(status, &body)).unwrap_err();
        let message = match err {
            ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::ServerError { message, .. } => message,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(message.chars().count(), MAX_MESSAGE_LEN + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_long_validation_message_is_truncated() {
        let body = serde_json::json!({ "message": "y".repeat(2 * MAX_MESSAGE_LEN) }).to_string();
        let details = validation_details(&body);
        assert_eq!(details.fields()[0].message.len(), MAX_MESSAGE_LEN + 3);
    }
}
