use log::warn;
use serde_json::json;

use crate::api::Api;
use crate::config;
use crate::core::errors::ApiError;
use crate::core::helpers::{hash_password, sanitize_text, verify_password};
use crate::models::models::{AuthSession, User};

impl Api {
    /// Log in with email + password. Fails with
    /// [`ApiError::InvalidCredentials`] when no account matches both.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = json!({ "email": email, "password": password });
        match self.post_remote("/auth/login", &body).await {
            Ok(session) => Ok(session),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(500).await;
                self.authenticate_local(email, password)
            }
        }
    }

    fn authenticate_local(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let user = self
            .users
            .iter()
            .find(|u| u.email == email && verify_password(password, &u.password))
            .ok_or(ApiError::InvalidCredentials)?;

        Ok(AuthSession {
            user: user.profile(),
            token: config::MOCK_TOKEN.to_string(),
        })
    }

    /// Create an account. Username and email uniqueness are checked in
    /// that order, before anything is written, so a rejected
    /// registration leaves the collections untouched.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        fullname: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let body = json!({
            "username": username,
            "email": email,
            "fullname": fullname,
            "password": password,
        });
        match self.post_remote("/auth/register", &body).await {
            Ok(session) => Ok(session),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(500).await;
                self.register_local(username, email, fullname, password)
            }
        }
    }

    fn register_local(
        &mut self,
        username: &str,
        email: &str,
        fullname: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let username = sanitize_text(username);
        let fullname = sanitize_text(fullname);

        if self.users.iter().any(|u| u.username == username) {
            return Err(ApiError::UsernameTaken);
        }
        if self.users.iter().any(|u| u.email == email) {
            return Err(ApiError::EmailTaken);
        }

        let user = User {
            id: Self::next_id(self.users.len()),
            username,
            fullname,
            email: email.to_string(),
            profile_picture: format!("https://i.pravatar.cc/150?img={}", self.users.len() + 10),
            bio: String::new(),
            password: hash_password(password)?,
            follower_count: 0,
            following_count: 0,
        };

        let session = AuthSession {
            user: user.profile(),
            token: config::MOCK_TOKEN.to_string(),
        };
        self.users.push(user);

        Ok(session)
    }
}
