use log::warn;
use serde_json::json;

use crate::api::Api;
use crate::core::errors::ApiError;
use crate::core::helpers::{now_millis, sanitize_text};
use crate::models::models::{ActionStatus, Comment, CommentWithUser, Post, PostWithDetails};

impl Api {
    /// The global feed: every post, newest first, joined with its author
    /// (relationship flag resolved against the session) and its comments
    /// with their authors.
    pub async fn list_posts(&self) -> Result<Vec<PostWithDetails>, ApiError> {
        match self.get_remote("/posts").await {
            Ok(posts) => Ok(posts),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(500).await;
                Ok(self.list_posts_local())
            }
        }
    }

    fn list_posts_local(&self) -> Vec<PostWithDetails> {
        let viewer = self.current_user();

        let mut posts: Vec<&Post> = self.posts.iter().collect();
        // Stable sort: posts with equal timestamps keep insertion order.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        posts
            .into_iter()
            .filter_map(|post| {
                let author = self.users.iter().find(|u| u.id == post.user_id)?;
                let is_following = viewer
                    .as_ref()
                    .map(|v| self.has_edge(&v.id, &author.id))
                    .unwrap_or(false);

                let comments = self
                    .comments
                    .iter()
                    .filter(|c| c.post_id == post.id)
                    .filter_map(|c| {
                        let commenter = self.users.iter().find(|u| u.id == c.user_id)?;
                        Some(CommentWithUser::new(c, commenter.profile()))
                    })
                    .collect();

                Some(PostWithDetails {
                    id: post.id.clone(),
                    user_id: post.user_id.clone(),
                    image: post.image.clone(),
                    caption: post.caption.clone(),
                    like_count: post.like_count,
                    liked_by_current_user: post.liked_by_current_user,
                    comments,
                    created_at: post.created_at,
                    user: author.profile_for_viewer(is_following),
                })
            })
            .collect()
    }

    /// One account's posts, newest first, as bare records — no author or
    /// comment join. The shape difference from [`Api::list_posts`] is
    /// deliberate and matches the remote contract.
    pub async fn list_user_posts(&self, user_id: &str) -> Result<Vec<Post>, ApiError> {
        let path = format!("/users/{}/posts", user_id);
        match self.get_remote(&path).await {
            Ok(posts) => Ok(posts),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(300).await;
                Ok(self.list_user_posts_local(user_id))
            }
        }
    }

    fn list_user_posts_local(&self, user_id: &str) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    pub async fn create_post(
        &mut self,
        user_id: &str,
        image: &str,
        caption: &str,
    ) -> Result<Post, ApiError> {
        let body = json!({ "userId": user_id, "image": image, "caption": caption });
        match self.post_remote("/posts", &body).await {
            Ok(post) => Ok(post),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(500).await;
                Ok(self.create_post_local(user_id, image, caption))
            }
        }
    }

    fn create_post_local(&mut self, user_id: &str, image: &str, caption: &str) -> Post {
        let post = Post {
            id: Self::next_id(self.posts.len()),
            user_id: user_id.to_string(),
            image: image.to_string(),
            caption: sanitize_text(caption),
            like_count: 0,
            liked_by_current_user: false,
            comments: Vec::new(),
            created_at: now_millis(),
        };
        self.posts.push(post.clone());
        post
    }

    pub async fn like_post(&mut self, user_id: &str, post_id: &str) -> Result<ActionStatus, ApiError> {
        let path = format!("/posts/{}/like", post_id);
        let body = json!({ "userId": user_id });
        match self.post_remote(&path, &body).await {
            Ok(status) => Ok(status),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(200).await;
                self.like_post_local(post_id)
            }
        }
    }

    fn like_post_local(&mut self, post_id: &str) -> Result<ActionStatus, ApiError> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(ApiError::PostNotFound)?;

        post.like_count += 1;
        post.liked_by_current_user = true;

        Ok(ActionStatus { success: true })
    }

    pub async fn unlike_post(
        &mut self,
        user_id: &str,
        post_id: &str,
    ) -> Result<ActionStatus, ApiError> {
        let path = format!("/posts/{}/unlike", post_id);
        let body = json!({ "userId": user_id });
        match self.post_remote(&path, &body).await {
            Ok(status) => Ok(status),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(200).await;
                self.unlike_post_local(post_id)
            }
        }
    }

    fn unlike_post_local(&mut self, post_id: &str) -> Result<ActionStatus, ApiError> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(ApiError::PostNotFound)?;

        post.like_count = post.like_count.saturating_sub(1);
        post.liked_by_current_user = false;

        Ok(ActionStatus { success: true })
    }

    /// Append a comment to a post. The post and the author are both
    /// validated before anything is written; the comment id lands at the
    /// end of the post's id list, preserving insertion order.
    pub async fn add_comment(
        &mut self,
        user_id: &str,
        post_id: &str,
        content: &str,
    ) -> Result<CommentWithUser, ApiError> {
        let path = format!("/posts/{}/comments", post_id);
        let body = json!({ "userId": user_id, "content": content });
        match self.post_remote(&path, &body).await {
            Ok(comment) => Ok(comment),
            Err(err) => {
                warn!("API call failed, using mock data: {}", err);
                self.simulate_latency(300).await;
                self.add_comment_local(user_id, post_id, content)
            }
        }
    }

    fn add_comment_local(
        &mut self,
        user_id: &str,
        post_id: &str,
        content: &str,
    ) -> Result<CommentWithUser, ApiError> {
        let post_idx = self
            .posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or(ApiError::PostNotFound)?;
        let author = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or(ApiError::UserNotFound)?
            .profile();

        let comment = Comment {
            id: Self::next_id(self.comments.len()),
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            content: sanitize_text(content),
            created_at: now_millis(),
        };

        let joined = CommentWithUser::new(&comment, author);
        self.posts[post_idx].comments.push(comment.id.clone());
        self.comments.push(comment);

        Ok(joined)
    }
}
