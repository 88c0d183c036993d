/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{ApprovalStatus, UserStatus};

/// Identity of the user a session belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role_template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sso: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sso_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferences: Vec<Preference>,
    /// Only ever sent, never returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    #[serde(rename = "type")]
    pub strategy_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streamer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derivative {
    #[serde(rename = "type")]
    pub derivative_type: String,
    pub url: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_frame: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strategies: Vec<Strategy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_name: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(default)]
    pub archive_status: Option<String>,
    #[serde(default)]
    pub transcript_status: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: String,
    #[serde(default)]
    pub date_created: Option<i64>,
    #[serde(default)]
    pub date_modified: Option<i64>,
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub my_rating: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub derivatives: Vec<Derivative>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub external: bool,
    /// Present only when requested with the ACL flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    pub auto_play: bool,
    pub height: u32,
    pub width: u32,
    pub playback: String,
    pub public: bool,
    pub stretching: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
    #[serde(default)]
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<Setting>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecipient {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl EmailRecipient {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: None,
            last_name: None,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailShare {
    pub audience: Vec<EmailRecipient>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub target_object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_share: Option<EmailShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_ids: Option<Vec<String>>,
    #[serde(default)]
    pub configuration: Configuration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shares: Vec<Share>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "at")]
    pub asset_id: String,
    /// The quicklink the comment was made in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_response_to: Option<String>,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
}

/// A folder inside a project, possibly nested under another folder
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Absent for folders at the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// A saved set of quicklink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLinkSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub settings: Vec<Setting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptLog {
    pub start_milliseconds: u64,
    pub end_milliseconds: u64,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub logs: Vec<TranscriptLog>,
    /// Download URLs keyed by format name
    #[serde(default)]
    pub formats: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_deserializes_service_payload() {
        let json = r#"{
            "id": "1234ABCD",
            "title": "videotest4.mov",
            "description": "",
            "fileName": "videotest4.mov",
            "projectId": "P1",
            "folderId": null,
            "uploadedBy": "simon",
            "approvalStatus": "none",
            "archiveStatus": "n/a",
            "transcriptStatus": "N/A",
            "type": "video",
            "dateCreated": 1396039017000,
            "dateModified": 1396039017000,
            "progress": 100,
            "commentCount": 0,
            "myRating": null,
            "averageRating": null,
            "permissions": ["asset.update"],
            "derivatives": [{
                "type": "proxy",
                "url": "https://cdn.example/a.mp4",
                "fileSize": 5696,
                "height": 360,
                "width": 640,
                "duration": 262060,
                "strategies": [{"type": "rtmp", "url": "a.mov", "streamer": "rtmp://s/cfx/st"}]
            }],
            "tags": ["awesome"],
            "private": false,
            "external": false
        }"#;

        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.asset_type, "video");
        assert_eq!(asset.approval_status, Some(ApprovalStatus::None));
        assert_eq!(asset.derivatives[0].strategies[0].strategy_type, "rtmp");
        assert!(asset.acl.is_none());
    }

    #[test]
    fn test_quicklink_skips_unset_fields() {
        let quicklink = QuickLink {
            id: None,
            title: Some("Dailies".to_string()),
            description: None,
            asset_ids: Some(vec!["A1".to_string()]),
            configuration: Configuration {
                id: None,
                settings: Some(vec![Setting::new("audience", "public")]),
            },
            shares: Vec::new(),
            owner_id: None,
            account_id: None,
            created: None,
            modified: None,
            expires: None,
            url: None,
            private: None,
            analytics: None,
        };

        let value = serde_json::to_value(&quicklink).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Dailies",
                "assetIds": ["A1"],
                "configuration": {"settings": [{"key": "audience", "value": "public"}]}
            })
        );
    }

    #[test]
    fn test_comment_uses_service_field_names() {
        let comment = Comment {
            id: None,
            asset_id: "A1".to_string(),
            context: Some("Q1".to_string()),
            in_response_to: None,
            body: "nice cut".to_string(),
            start_time_code: Some(1200),
            end_time_code: None,
            user: None,
            date_created: None,
        };
        let value = serde_json::to_value(&comment).unwrap();
        assert_eq!(value["at"], "A1");
        assert_eq!(value["context"], "Q1");
        assert_eq!(value["startTimeCode"], 1200);
        assert!(value.get("inResponseTo").is_none());
    }

    #[test]
    fn test_transcript_deserializes_logs() {
        let json = r#"{
            "logs": [{
                "startMilliseconds": 9100,
                "endMilliseconds": 15660,
                "speaker": "Suzie Smith",
                "description": "So, tell me a little bit about your hometown."
            }],
            "formats": {"Timecoded JSON": "https://transcripts.example/3473618.json"}
        }"#;

        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.logs[0].end_milliseconds, 15660);
        assert_eq!(transcript.logs[0].speaker, "Suzie Smith");
        assert_eq!(
            transcript.formats.get("Timecoded JSON").map(String::as_str),
            Some("https://transcripts.example/3473618.json")
        );
    }
}
