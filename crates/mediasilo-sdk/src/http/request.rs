/*
[INPUT]:  Method, resolved path, query pairs and optional JSON body
[OUTPUT]: Request / SignedRequest / normalized Response values
[POS]:    HTTP layer - per-call request and response shapes
[UPDATE]: When adding request options or response accessors
*/

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::Session;
use crate::http::{ApiError, Result};

/// A single call against the API, built per call and never reused
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub requires_auth: bool,
}

impl Request {
    /// Authenticated request without query or body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters
    pub fn queries<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a JSON body; `null` bodies are dropped
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.body = (!value.is_null()).then_some(value);
        Ok(self)
    }

    /// Mark the request as not needing any authentication material
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }
}

/// A request plus the authentication headers computed for it
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub request: Request,
    pub auth_headers: BTreeMap<String, String>,
    pub(crate) session: Option<Session>,
}

impl SignedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.auth_headers.get(name).map(String::as_str)
    }
}

/// Normalized response, immutable once received
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Decode the body, reporting undecodable bodies as `MalformedResponse`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            tracing::warn!(
                status = self.status.as_u16(),
                error = %e,
                "response body did not match the expected shape"
            );
            ApiError::MalformedResponse(e.to_string())
        })
    }
}
