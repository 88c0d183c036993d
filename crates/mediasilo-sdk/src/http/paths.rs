/*
[INPUT]:  Resource identifiers supplied by callers
[OUTPUT]: Resolved resource paths relative to the API base URL
[POS]:    HTTP layer - path templates for every resource family
[UPDATE]: When endpoints move or new resource families are added
*/

use urlencoding::encode;

pub const SESSION: &str = "session";
pub const ME: &str = "me";
pub const PROJECTS: &str = "projects";
pub const FAVORITE_PROJECTS: &str = "favorites/projects";
pub const CHANNELS: &str = "channels";
pub const QUICKLINKS: &str = "quicklinks";
pub const SHARES: &str = "shares";
pub const PASSWORD_RESET: &str = "passwordreset";
pub const QUICKLINK_SETTINGS: &str = "quicklinks/settings";
pub const QUICKLINK_AGGREGATE_EVENTS: &str = "analytics/quicklinks/aggregate";

pub fn user(user_id: &str) -> String {
    format!("users/{}", encode(user_id))
}

pub fn user_preferences(user_id: &str) -> String {
    format!("users/{}/preferences", encode(user_id))
}

pub fn user_preference(user_id: &str, name: &str) -> String {
    format!("users/{}/preferences/{}", encode(user_id), encode(name))
}

pub fn account_preferences(account_id: &str) -> String {
    format!("accounts/{}/preferences", encode(account_id))
}

pub fn account_preference(account_id: &str, name: &str) -> String {
    format!("accounts/{}/preferences/{}", encode(account_id), encode(name))
}

pub fn project(project_id: &str) -> String {
    format!("projects/{}", encode(project_id))
}

pub fn project_users(project_id: &str) -> String {
    format!("projects/{}/users", encode(project_id))
}

pub fn project_folders(project_id: &str) -> String {
    format!("projects/{}/folders", encode(project_id))
}

pub fn users_projects(user_id: &str) -> String {
    format!("users/{}/projects", encode(user_id))
}

pub fn clone_project(project_id: &str) -> String {
    format!("projects/{}/clone", encode(project_id))
}

pub fn favorite_project(project_id: &str) -> String {
    format!("favorites/projects/{}", encode(project_id))
}

pub fn asset(asset_id: &str) -> String {
    format!("assets/{}", encode(asset_id))
}

/// Bulk lookup, ids are joined with commas into one segment
pub fn assets<S: AsRef<str>>(asset_ids: &[S]) -> String {
    let joined = asset_ids
        .iter()
        .map(|id| encode(id.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!("assets/{joined}")
}

pub fn project_assets(project_id: &str) -> String {
    format!("projects/{}/assets", encode(project_id))
}

pub fn asset_metadata(asset_id: &str) -> String {
    format!("assets/{}/metadata", encode(asset_id))
}

pub fn asset_metadatum(asset_id: &str, key: &str) -> String {
    format!("assets/{}/metadata/{}", encode(asset_id), encode(key))
}

pub fn transcript(asset_id: &str) -> String {
    format!("assets/{}/transcript", encode(asset_id))
}

pub fn folder(folder_id: &str) -> String {
    format!("folders/{}", encode(folder_id))
}

pub fn subfolders(folder_id: &str) -> String {
    format!("folders/{}/subfolders", encode(folder_id))
}

pub fn folder_assets(folder_id: &str) -> String {
    format!("folders/{}/assets", encode(folder_id))
}

pub fn channel(channel_id: &str) -> String {
    format!("channels/{}", encode(channel_id))
}

pub fn quicklink(quicklink_id: &str) -> String {
    format!("quicklinks/{}", encode(quicklink_id))
}

pub fn quicklink_comments(quicklink_id: &str, asset_id: &str) -> String {
    format!(
        "quicklinks/{}/assets/{}/comments",
        encode(quicklink_id),
        encode(asset_id)
    )
}

pub fn quicklink_comments_export(quicklink_id: &str, asset_id: &str, format: &str) -> String {
    format!(
        "quicklinks/{}/assets/{}/comments/export/{}",
        encode(quicklink_id),
        encode(asset_id),
        encode(format)
    )
}

pub fn quicklink_shares(quicklink_id: &str) -> String {
    format!("quicklinks/{}/shares", encode(quicklink_id))
}

pub fn quicklink_setting(setting_id: &str) -> String {
    format!("{QUICKLINK_SETTINGS}/{}", encode(setting_id))
}

/// Event names are joined with commas into one segment
pub fn analytics<S: AsRef<str>>(events: &[S]) -> String {
    let joined = events
        .iter()
        .map(|e| encode(e.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!("analytics/{joined}")
}

pub fn password_reset_token(token: &str) -> String {
    format!("{PASSWORD_RESET}/{}", encode(token))
}
