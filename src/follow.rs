use log::warn;

use crate::api::Api;
use crate::core::errors::ApiError;
use crate::models::models::{ActionStatus, FollowEdge};

impl Api {
    pub(crate) fn has_edge(&self, follower_id: &str, following_id: &str) -> bool {
        self.follows
            .iter()
            .any(|e| e.follower_id == follower_id && e.following_id == following_id)
    }

    /// Follow `following_id` as `follower_id`. Idempotent: a second
    /// follow of the same pair changes nothing. The edge insert and both
    /// denormalized counters move in the same exclusive mutation.
    pub async fn follow(
        &mut self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<ActionStatus, ApiError> {
        let path = format!("/users/{}/follow/{}", follower_id, following_id);
        match self.post_empty(&path).await {
            Ok(status) => Ok(status),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(300).await;
                self.follow_local(follower_id, following_id)
            }
        }
    }

    fn follow_local(
        &mut self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<ActionStatus, ApiError> {
        let follower = self
            .users
            .iter()
            .position(|u| u.id == follower_id)
            .ok_or(ApiError::UserNotFound)?;
        let following = self
            .users
            .iter()
            .position(|u| u.id == following_id)
            .ok_or(ApiError::UserNotFound)?;

        // Accepted but inert when self-follows are disabled.
        if follower_id == following_id && !self.allow_self_follow {
            return Ok(ActionStatus { success: true });
        }

        if !self.has_edge(follower_id, following_id) {
            self.follows.push(FollowEdge {
                follower_id: follower_id.to_string(),
                following_id: following_id.to_string(),
            });
            self.users[follower].following_count += 1;
            self.users[following].follower_count += 1;
        }

        Ok(ActionStatus { success: true })
    }

    /// Remove the follow edge if present; a missing edge is a no-op,
    /// not an error. Counters saturate at zero.
    pub async fn unfollow(
        &mut self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<ActionStatus, ApiError> {
        let path = format!("/users/{}/unfollow/{}", follower_id, following_id);
        match self.post_empty(&path).await {
            Ok(status) => Ok(status),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(300).await;
                self.unfollow_local(follower_id, following_id)
            }
        }
    }

    fn unfollow_local(
        &mut self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<ActionStatus, ApiError> {
        let follower = self
            .users
            .iter()
            .position(|u| u.id == follower_id)
            .ok_or(ApiError::UserNotFound)?;
        let following = self
            .users
            .iter()
            .position(|u| u.id == following_id)
            .ok_or(ApiError::UserNotFound)?;

        let edge = self
            .follows
            .iter()
            .position(|e| e.follower_id == follower_id && e.following_id == following_id);

        if let Some(pos) = edge {
            self.follows.remove(pos);
            self.users[follower].following_count =
                self.users[follower].following_count.saturating_sub(1);
            self.users[following].follower_count =
                self.users[following].follower_count.saturating_sub(1);
        }

        Ok(ActionStatus { success: true })
    }
}
