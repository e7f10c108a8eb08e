use log::warn;

use crate::api::Api;
use crate::config;
use crate::core::errors::ApiError;
use crate::core::helpers::sanitize_text;
use crate::core::storage;
use crate::models::models::{ProfileUpdate, User, UserProfile};

impl Api {
    /// Look up an account by username. `is_following` is populated only
    /// when a session identity exists to compute it against.
    pub async fn get_user(&self, username: &str) -> Result<UserProfile, ApiError> {
        let path = format!("/users/{}", username);
        match self.get_remote(&path).await {
            Ok(profile) => Ok(profile),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(300).await;
                self.get_user_local(username)
            }
        }
    }

    fn get_user_local(&self, username: &str) -> Result<UserProfile, ApiError> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username)
            .ok_or(ApiError::UserNotFound)?;

        match self.current_user() {
            Some(viewer) => Ok(user.profile_for_viewer(self.has_edge(&viewer.id, &user.id))),
            None => Ok(user.profile()),
        }
    }

    /// Partial profile edit. Collisions are checked against *other*
    /// accounts before anything is applied; renaming to your own current
    /// username or email is a no-op, not a conflict. When the edited
    /// account is the session account, the persisted session projection
    /// is refreshed in place.
    pub async fn update_profile(
        &mut self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        let path = format!("/users/{}", user_id);
        match self.put_remote(&path, update).await {
            Ok(profile) => Ok(profile),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(500).await;
                self.update_profile_local(user_id, update)
            }
        }
    }

    fn update_profile_local(
        &mut self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or(ApiError::UserNotFound)?;

        let username = update.username.as_deref().map(sanitize_text);
        let fullname = update.fullname.as_deref().map(sanitize_text);
        let bio = update.bio.as_deref().map(sanitize_text);

        if let Some(username) = username.as_deref() {
            if username != self.users[idx].username
                && self
                    .users
                    .iter()
                    .any(|u| u.username == username && u.id != user_id)
            {
                return Err(ApiError::UsernameTaken);
            }
        }
        if let Some(email) = update.email.as_deref() {
            if email != self.users[idx].email
                && self.users.iter().any(|u| u.email == email && u.id != user_id)
            {
                return Err(ApiError::EmailTaken);
            }
        }

        let user = &mut self.users[idx];
        if let Some(username) = username {
            user.username = username;
        }
        if let Some(fullname) = fullname {
            user.fullname = fullname;
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(bio) = bio {
            user.bio = bio;
        }
        if let Some(picture) = &update.profile_picture {
            user.profile_picture = picture.clone();
        }

        let profile = self.users[idx].profile();

        // Write-through: keep the persisted session projection current
        // when the edited account is the one logged in.
        if let Ok(Some(session_user)) =
            storage::get_json::<UserProfile>(self.storage(), config::USER_STORAGE_KEY)
        {
            if session_user.id == profile.id {
                if let Err(err) =
                    storage::set_json(self.storage(), config::USER_STORAGE_KEY, &profile)
                {
                    warn!("failed to refresh persisted session: {}", err);
                }
            }
        }

        Ok(profile)
    }

    /// Case-sensitive substring search over username and fullname. An
    /// empty match set is a success, never an error.
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>, ApiError> {
        let path = format!("/users/search?q={}", urlencoding::encode(query));
        match self.get_remote(&path).await {
            Ok(results) => Ok(results),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(300).await;
                Ok(self.search_users_local(query))
            }
        }
    }

    fn search_users_local(&self, query: &str) -> Vec<UserProfile> {
        self.users
            .iter()
            .filter(|u| u.username.contains(query) || u.fullname.contains(query))
            .map(User::profile)
            .collect()
    }
}
