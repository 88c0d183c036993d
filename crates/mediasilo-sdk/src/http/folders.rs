/*
[INPUT]:  Folder and project identifiers
[OUTPUT]: Folder records and folder trees one level at a time
[POS]:    HTTP layer - folder endpoints
[UPDATE]: When adding folder endpoints
*/

// ### Folder Endpoints

use crate::http::paths;
use crate::http::{MediaSiloClient, Result};
use crate::types::Folder;

impl MediaSiloClient {
    /// GET /folders/{id}
    pub async fn get_folder(&self, folder_id: &str) -> Result<Folder> {
        self.get_json(&paths::folder(folder_id), &[]).await
    }

    /// Direct children only
    ///
    /// GET /folders/{id}/subfolders
    pub async fn get_subfolders(&self, parent_folder_id: &str) -> Result<Vec<Folder>> {
        self.get_json(&paths::subfolders(parent_folder_id), &[])
            .await
    }

    /// Folders at the root of a project
    ///
    /// GET /projects/{id}/folders
    pub async fn get_project_folders(&self, project_id: &str) -> Result<Vec<Folder>> {
        self.get_json(&paths::project_folders(project_id), &[])
            .await
    }
}
