/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::CurrentUser;

/// Result of the credential exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session: String,
    #[serde(default)]
    pub user: Option<CurrentUser>,
}

/// Body returned by endpoints that create a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Outcome of completing a password reset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetOutcome {
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// One page of a listing, with the paging state the service reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Whether pages after this one hold more results
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_has_more() {
        let page: Paginated<String> = serde_json::from_str(
            r#"{"total": 5, "page": 1, "pageSize": 2, "results": ["a", "b"]}"#,
        )
        .unwrap();
        assert!(page.has_more());

        let last = Paginated {
            page: 3,
            ..page
        };
        assert!(!last.has_more());
    }
}
