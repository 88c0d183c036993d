/*
[INPUT]:  User identifiers, preference names and values
[OUTPUT]: Current user, user records and preferences
[POS]:    HTTP layer - user and preference endpoints
[UPDATE]: When adding user endpoints or changing preference semantics
*/

// ### User Endpoints

use crate::http::paths;
use crate::http::{ApiError, MediaSiloClient, Result};
use crate::types::{CurrentUser, Preference, PreferenceUpdate, User, UserProfileUpdate};

impl MediaSiloClient {
    /// Fetch the authenticated user.
    ///
    /// In session mode this also refreshes the user stored with the session.
    ///
    /// GET /me
    pub async fn me(&self) -> Result<User> {
        let user: User = self.get_json(paths::ME, &[]).await?;

        if let (Some(session), Some(current)) = (self.session(), current_user_of(&user)) {
            self.store().sessions().refresh_user(session.token(), current);
        }
        Ok(user)
    }

    /// GET /users/{id}
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.get_json(&paths::user(user_id), &[]).await
    }

    /// PUT /users/{id}
    pub async fn update_user(&self, user_id: &str, user: &User) -> Result<()> {
        self.put(&paths::user(user_id), user).await?;
        Ok(())
    }

    /// Change selected profile fields of a user, including their password
    ///
    /// PUT /users/{id}
    pub async fn update_user_profile(&self, user_id: &str, profile: &UserProfileUpdate) -> Result<()> {
        self.put(&paths::user(user_id), profile).await?;
        Ok(())
    }

    /// All preferences of the current user
    ///
    /// GET /users/{me}/preferences
    pub async fn get_user_preferences(&self) -> Result<Vec<Preference>> {
        let me = self.current_user().await?;
        self.get_json(&paths::user_preferences(&me.id), &[]).await
    }

    /// GET /users/{me}/preferences/{name}
    pub async fn get_user_preference(&self, name: &str) -> Result<Preference> {
        let me = self.current_user().await?;
        self.get_json(&paths::user_preference(&me.id, name), &[])
            .await
    }

    /// PUT /users/{me}/preferences/{name}
    pub async fn update_user_preference(&self, name: &str, value: &str) -> Result<()> {
        let me = self.current_user().await?;
        let body = PreferenceUpdate {
            name: name.to_string(),
            value: value.to_string(),
        };
        self.put(&paths::user_preference(&me.id, name), &body)
            .await?;
        Ok(())
    }

    /// Preferences of another user. Requires permission to read that user.
    ///
    /// GET /users/{id}/preferences
    pub async fn get_user_preferences_for(&self, user_id: &str) -> Result<Vec<Preference>> {
        self.get_json(&paths::user_preferences(user_id), &[]).await
    }

    /// Requires permission to modify that user.
    ///
    /// PUT /users/{id}/preferences/{name}
    pub async fn update_preference_for_user(&self, user_id: &str, name: &str, value: &str) -> Result<()> {
        let body = PreferenceUpdate {
            name: name.to_string(),
            value: value.to_string(),
        };
        self.put(&paths::user_preference(user_id, name), &body)
            .await?;
        Ok(())
    }

    /// All preferences of the current user's account
    ///
    /// GET /accounts/{account}/preferences
    pub async fn get_account_preferences(&self) -> Result<Vec<Preference>> {
        let me = self.current_user().await?;
        self.get_json(&paths::account_preferences(&me.account_id), &[])
            .await
    }

    /// GET /accounts/{account}/preferences/{name}
    pub async fn get_account_preference(&self, name: &str) -> Result<Preference> {
        let me = self.current_user().await?;
        self.get_json(&paths::account_preference(&me.account_id, name), &[])
            .await
    }

    /// PUT /accounts/{account}/preferences/{name}
    pub async fn update_account_preference(&self, name: &str, value: &str) -> Result<()> {
        let me = self.current_user().await?;
        let body = PreferenceUpdate {
            name: name.to_string(),
            value: value.to_string(),
        };
        self.put(&paths::account_preference(&me.account_id, name), &body)
            .await?;
        Ok(())
    }

    // Session user when known, otherwise one round trip to /me.
    async fn current_user(&self) -> Result<CurrentUser> {
        if let Some(user) = self.session().and_then(|s| s.user().cloned()) {
            return Ok(user);
        }
        let user = self.me().await?;
        current_user_of(&user).ok_or_else(|| {
            ApiError::MalformedResponse(
                "current user is missing id or accountId".to_string(),
            )
        })
    }
}

fn current_user_of(user: &User) -> Option<CurrentUser> {
    Some(CurrentUser {
        id: user.id.clone()?,
        account_id: user.account_id.clone()?,
        user_name: user.user_name.clone(),
    })
}
