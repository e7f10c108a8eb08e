use serde::{Serialize, Deserialize};

/// Full user record. Never leaves the service: every outward shape is a
/// [`UserProfile`] with the credential stripped.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub profile_picture: String,
    pub bio: String,
    pub password: String,
    pub follower_count: u32,
    pub following_count: u32,
}

/// Credential-stripped projection of [`User`].
///
/// `is_following` is only present when there is a session identity to
/// compute it against, and is omitted from JSON otherwise.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub profile_picture: String,
    pub bio: String,
    pub follower_count: u32,
    pub following_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
            fullname: self.fullname.clone(),
            email: self.email.clone(),
            profile_picture: self.profile_picture.clone(),
            bio: self.bio.clone(),
            follower_count: self.follower_count,
            following_count: self.following_count,
            is_following: None,
        }
    }

    pub fn profile_for_viewer(&self, is_following: bool) -> UserProfile {
        UserProfile {
            is_following: Some(is_following),
            ..self.profile()
        }
    }
}

/// Directed follow edge. At most one edge per ordered pair.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FollowEdge {
    pub follower_id: String,
    pub following_id: String,
}

/// Bare post record as stored. `comments` holds comment ids in insertion
/// order; `liked_by_current_user` is a single shared flag, not a
/// per-viewer ledger, so it only reflects the most recent viewer's action.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub image: String,
    pub caption: String,
    pub like_count: u32,
    #[serde(default)]
    pub liked_by_current_user: bool,
    pub comments: Vec<String>,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: i64,
}

/// Comment joined with its author's profile.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CommentWithUser {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: i64,
    pub user: UserProfile,
}

impl CommentWithUser {
    pub fn new(comment: &Comment, user: UserProfile) -> Self {
        CommentWithUser {
            id: comment.id.clone(),
            post_id: comment.post_id.clone(),
            user_id: comment.user_id.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            user,
        }
    }
}

/// Post joined with its author and comment authors. This is the shape of
/// the global feed; per-user listings return bare [`Post`] records.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostWithDetails {
    pub id: String,
    pub user_id: String,
    pub image: String,
    pub caption: String,
    pub like_count: u32,
    #[serde(default)]
    pub liked_by_current_user: bool,
    pub comments: Vec<CommentWithUser>,
    pub created_at: i64,
    pub user: UserProfile,
}

/// Result of `authenticate`/`register`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

/// Acknowledgement shape for follow/unfollow and like/unlike.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ActionStatus {
    pub success: bool,
}

/// Partial profile edit. Absent fields are left untouched; the id,
/// credential, and counters are not editable through this shape.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}
