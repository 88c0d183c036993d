/*
[INPUT]:  QuickLink models, comment bodies and share recipients
[OUTPUT]: QuickLinks (plain or paginated), saved settings, comments and shares
[POS]:    HTTP layer - quicklink, setting, comment and share endpoints
[UPDATE]: When adding quicklink endpoints or export formats
*/

// ### QuickLink Endpoints

use crate::http::paths;
use crate::http::request::Request;
use crate::http::{MediaSiloClient, Result};
use crate::types::{
    Comment, CommentDraft, CommentExportFormat, CreatedResponse, EmailRecipient, EmailShare,
    Paginated, QuickLink, QuickLinkQuery, QuickLinkSetting, Share,
};

const INCLUDE_ANALYTICS: (&str, &str) = ("include", "analytics");
const PAGINATE: (&str, &str) = ("paginate", "true");

fn listing_request(query: &QuickLinkQuery) -> Request {
    let request = Request::get(paths::QUICKLINKS).queries(query.params.iter().cloned());
    if query.include_analytics {
        request.query(INCLUDE_ANALYTICS.0, INCLUDE_ANALYTICS.1)
    } else {
        request
    }
}

impl MediaSiloClient {
    /// Persist a quicklink. This does not send it to anyone.
    ///
    /// POST /quicklinks
    pub async fn create_quicklink(&self, quicklink: &QuickLink) -> Result<QuickLink> {
        let created: CreatedResponse = self.post_json(paths::QUICKLINKS, quicklink).await?;
        Ok(QuickLink {
            id: Some(created.id),
            ..quicklink.clone()
        })
    }

    /// GET /quicklinks/{id}?include=analytics
    pub async fn get_quicklink(&self, quicklink_id: &str, include_analytics: bool) -> Result<QuickLink> {
        let mut request = Request::get(paths::quicklink(quicklink_id));
        if include_analytics {
            request = request.query(INCLUDE_ANALYTICS.0, INCLUDE_ANALYTICS.1);
        }
        self.execute(request).await?.json()
    }

    /// GET /quicklinks?{params}&include=analytics
    pub async fn get_quicklinks(&self, query: &QuickLinkQuery) -> Result<Vec<QuickLink>> {
        self.execute(listing_request(query)).await?.json()
    }

    /// Same listing wrapped in its paging envelope. Use
    /// [`QuickLinkQuery::page`] to pick the page.
    ///
    /// GET /quicklinks?{params}&paginate=true
    pub async fn get_quicklinks_paginated(&self, query: &QuickLinkQuery) -> Result<Paginated<QuickLink>> {
        let request = listing_request(query).query(PAGINATE.0, PAGINATE.1);
        self.execute(request).await?.json()
    }

    /// GET /quicklinks/settings
    pub async fn get_quicklink_settings(&self) -> Result<Vec<QuickLinkSetting>> {
        self.get_json(paths::QUICKLINK_SETTINGS, &[]).await
    }

    /// GET /quicklinks/settings/{id}
    pub async fn get_quicklink_setting(&self, setting_id: &str) -> Result<QuickLinkSetting> {
        self.get_json(&paths::quicklink_setting(setting_id), &[])
            .await
    }

    /// Unset fields of `quicklink` are left untouched by the service.
    ///
    /// PUT /quicklinks/{id}
    pub async fn update_quicklink(&self, quicklink_id: &str, quicklink: &QuickLink) -> Result<()> {
        self.put(&paths::quicklink(quicklink_id), quicklink).await?;
        Ok(())
    }

    /// Comment on an asset inside a quicklink, returning the new comment id
    ///
    /// POST /quicklinks/{id}/assets/{asset}/comments
    pub async fn comment_on_quicklink_asset(
        &self,
        quicklink_id: &str,
        asset_id: &str,
        draft: &CommentDraft,
    ) -> Result<String> {
        let comment = Comment {
            id: None,
            asset_id: asset_id.to_string(),
            context: Some(quicklink_id.to_string()),
            in_response_to: draft.in_response_to.clone(),
            body: draft.body.clone(),
            start_time_code: draft.start_time_code,
            end_time_code: draft.end_time_code,
            user: draft.user.clone(),
            date_created: None,
        };
        let created: CreatedResponse = self
            .post_json(&paths::quicklink_comments(quicklink_id, asset_id), &comment)
            .await?;
        Ok(created.id)
    }

    /// GET /quicklinks/{id}/assets/{asset}/comments
    pub async fn get_quicklink_comments(&self, quicklink_id: &str, asset_id: &str) -> Result<Vec<Comment>> {
        self.get_json(&paths::quicklink_comments(quicklink_id, asset_id), &[])
            .await
    }

    /// Comments rendered by the service in `format`, returned verbatim
    ///
    /// GET /quicklinks/{id}/assets/{asset}/comments/export/{format}
    pub async fn export_quicklink_comments(
        &self,
        quicklink_id: &str,
        asset_id: &str,
        format: CommentExportFormat,
    ) -> Result<String> {
        let path = paths::quicklink_comments_export(quicklink_id, asset_id, format.as_str());
        Ok(self.get(&path, &[]).await?.into_body())
    }

    /// Email a quicklink to a list of recipients
    ///
    /// POST /shares
    pub async fn share_quicklink(
        &self,
        quicklink_id: &str,
        subject: &str,
        message: &str,
        emails: &[&str],
    ) -> Result<Share> {
        let share = Share {
            id: None,
            target_object_id: quicklink_id.to_string(),
            email_share: Some(EmailShare {
                audience: emails.iter().map(|e| EmailRecipient::new(*e)).collect(),
                message: message.to_string(),
                subject: subject.to_string(),
            }),
        };
        let created: CreatedResponse = self.post_json(paths::SHARES, &share).await?;
        Ok(Share {
            id: Some(created.id),
            ..share
        })
    }

    /// Shares already made for a quicklink
    ///
    /// GET /quicklinks/{id}/shares
    pub async fn get_quicklink_shares(&self, quicklink_id: &str) -> Result<Vec<Share>> {
        self.get_json(&paths::quicklink_shares(quicklink_id), &[])
            .await
    }
}
