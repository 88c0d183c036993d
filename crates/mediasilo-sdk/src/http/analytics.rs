/*
[INPUT]:  Event names, analytics queries and quicklink identifiers
[OUTPUT]: Tracked events as returned by the analytics service
[POS]:    HTTP layer - analytics endpoints
[UPDATE]: When the analytics query format changes
*/

// ### Analytics Endpoints

use serde_json::Value;

use crate::http::paths;
use crate::http::{MediaSiloClient, Result};
use crate::types::AggregateEventsRequest;

impl MediaSiloClient {
    /// Tracked events of the given kinds, filtered by `query`.
    ///
    /// The query is passed through untouched; its shape is defined by the
    /// analytics service.
    ///
    /// POST /analytics/{event1},{event2},...
    pub async fn get_analytics<S: AsRef<str>>(&self, events: &[S], query: &Value) -> Result<Vec<Value>> {
        self.post_json(&paths::analytics(events), query).await
    }

    /// Event counts per quicklink. An empty id list makes no request.
    ///
    /// POST /analytics/quicklinks/aggregate
    pub async fn get_quicklink_aggregate_events(&self, quicklink_ids: &[&str]) -> Result<Vec<Value>> {
        if quicklink_ids.is_empty() {
            return Ok(Vec::new());
        }
        let body = AggregateEventsRequest { quicklink_ids };
        self.post_json(paths::QUICKLINK_AGGREGATE_EVENTS, &body)
            .await
    }
}
