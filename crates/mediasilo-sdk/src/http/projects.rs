/*
[INPUT]:  Project models and identifiers
[OUTPUT]: Project records, created ids, members and favorites
[POS]:    HTTP layer - project and favorite endpoints
[UPDATE]: When adding project endpoints or changing favorite semantics
*/

// ### Project Endpoints

use crate::http::paths;
use crate::http::request::Request;
use crate::http::{MediaSiloClient, Result};
use crate::types::{CreatedResponse, Project, User};

impl MediaSiloClient {
    /// Create a project, returning it with the id assigned by the service
    ///
    /// POST /projects
    pub async fn create_project(&self, project: &Project) -> Result<Project> {
        let created: CreatedResponse = self.post_json(paths::PROJECTS, project).await?;
        Ok(Project {
            id: Some(created.id),
            ..project.clone()
        })
    }

    /// GET /projects/{id}
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.get_json(&paths::project(project_id), &[]).await
    }

    /// GET /projects
    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        self.get_json(paths::PROJECTS, &[]).await
    }

    /// Projects of another user. Requires permission to read that user.
    ///
    /// GET /users/{id}/projects
    pub async fn get_users_projects(&self, user_id: &str) -> Result<Vec<Project>> {
        self.get_json(&paths::users_projects(user_id), &[]).await
    }

    /// Users assigned to a project
    ///
    /// GET /projects/{id}/users
    pub async fn get_project_users(&self, project_id: &str) -> Result<Vec<User>> {
        self.get_json(&paths::project_users(project_id), &[]).await
    }

    /// PUT /projects/{id}
    pub async fn update_project(&self, project_id: &str, project: &Project) -> Result<()> {
        self.put(&paths::project(project_id), project).await?;
        Ok(())
    }

    /// The service refuses to delete a project that still holds assets.
    ///
    /// DELETE /projects/{id}
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        self.delete(&paths::project(project_id)).await?;
        Ok(())
    }

    /// Copy structure and users of a project into a new one
    ///
    /// POST /projects/{id}/clone
    pub async fn clone_project(&self, project_id: &str) -> Result<Project> {
        self.execute(Request::post(paths::clone_project(project_id)))
            .await?
            .json()
    }

    /// POST /favorites/projects/{id}
    pub async fn favor_project(&self, project_id: &str) -> Result<()> {
        self.execute(Request::post(paths::favorite_project(project_id)))
            .await?;
        Ok(())
    }

    /// DELETE /favorites/projects/{id}
    pub async fn unfavor_project(&self, project_id: &str) -> Result<()> {
        self.delete(&paths::favorite_project(project_id)).await?;
        Ok(())
    }

    /// GET /favorites/projects
    pub async fn get_favorite_projects(&self) -> Result<Vec<Project>> {
        self.get_json(paths::FAVORITE_PROJECTS, &[]).await
    }
}
