/*
[INPUT]:  Asset, project and folder identifiers plus the ACL flag
[OUTPUT]: Asset records (optionally with the caller's ACL), metadata and transcripts
[POS]:    HTTP layer - asset lookup, metadata and transcript endpoints
[UPDATE]: When adding asset endpoints or include options
*/

// ### Asset Endpoints

use crate::http::paths;
use crate::http::{MediaSiloClient, Result};
use crate::types::{Asset, Metadata, Transcript};

const INCLUDE_ACL: (&str, &str) = ("include", "acl");

fn acl_query(acl: bool) -> &'static [(&'static str, &'static str)] {
    if acl { &[INCLUDE_ACL] } else { &[] }
}

impl MediaSiloClient {
    /// GET /assets/{id}?include=acl
    pub async fn get_asset(&self, asset_id: &str, acl: bool) -> Result<Asset> {
        self.get_json(&paths::asset(asset_id), acl_query(acl)).await
    }

    /// Several assets in one call. An empty id list makes no request.
    ///
    /// GET /assets/{id1},{id2},...?include=acl
    pub async fn get_assets_by_ids<S: AsRef<str>>(&self, asset_ids: &[S], acl: bool) -> Result<Vec<Asset>> {
        if asset_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.get_json(&paths::assets(asset_ids), acl_query(acl))
            .await
    }

    /// GET /projects/{id}/assets?include=acl
    pub async fn get_assets_by_project(&self, project_id: &str, acl: bool) -> Result<Vec<Asset>> {
        self.get_json(&paths::project_assets(project_id), acl_query(acl))
            .await
    }

    /// GET /folders/{id}/assets?include=acl
    pub async fn get_assets_by_folder(&self, folder_id: &str, acl: bool) -> Result<Vec<Asset>> {
        self.get_json(&paths::folder_assets(folder_id), acl_query(acl))
            .await
    }

    /// GET /assets/{id}/metadata
    pub async fn get_asset_metadata(&self, asset_id: &str) -> Result<Vec<Metadata>> {
        self.get_json(&paths::asset_metadata(asset_id), &[]).await
    }

    /// GET /assets/{id}/metadata/{key}
    pub async fn get_asset_metadatum(&self, asset_id: &str, key: &str) -> Result<Metadata> {
        self.get_json(&paths::asset_metadatum(asset_id, key), &[])
            .await
    }

    /// Timecoded dialogue logs, for assets that have been transcribed
    ///
    /// GET /assets/{id}/transcript
    pub async fn get_transcript(&self, asset_id: &str) -> Result<Transcript> {
        self.get_json(&paths::transcript(asset_id), &[]).await
    }
}
