/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{PasswordResetType, UserStatus};
use super::models::Address;

/// Body of the credential exchange. Not `Debug`, it carries the password.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub hostname: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub hostname: String,
    pub username: String,
    #[serde(rename = "type")]
    pub reset_type: PasswordResetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
}

#[derive(Serialize)]
pub struct PasswordReset<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

/// Parameters for a project-scoped or paginated quicklink listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickLinkQuery {
    pub params: Vec<(String, String)>,
    pub include_analytics: bool,
}

impl QuickLinkQuery {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn with_analytics(mut self) -> Self {
        self.include_analytics = true;
        self
    }

    /// Ask for one page of results; pages are numbered from 1
    pub fn page(self, page: u32, page_size: u32) -> Self {
        self.param("_page", page.to_string())
            .param("_pageSize", page_size.to_string())
    }
}

/// A comment to post on an asset inside a quicklink
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentDraft {
    pub body: String,
    pub in_response_to: Option<String>,
    /// Milliseconds into the asset
    pub start_time_code: Option<i64>,
    pub end_time_code: Option<i64>,
    /// Commenter shown instead of the session user, for anonymous viewers
    pub user: Option<serde_json::Value>,
}

impl CommentDraft {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn in_response_to(mut self, comment_id: impl Into<String>) -> Self {
        self.in_response_to = Some(comment_id.into());
        self
    }

    pub fn time_codes(mut self, start: i64, end: Option<i64>) -> Self {
        self.start_time_code = Some(start);
        self.end_time_code = end;
        self
    }

    pub fn user(mut self, user: serde_json::Value) -> Self {
        self.user = Some(user);
        self
    }
}

/// Profile fields to change on a user. Unset fields are left as they are.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_role_template_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateEventsRequest<'a> {
    pub quicklink_ids: &'a [&'a str],
}
