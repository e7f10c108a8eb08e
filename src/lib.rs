pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod follow;
pub mod models;
pub mod posts;
pub mod session;
pub mod users;

pub use crate::api::Api;
pub use crate::core::errors::ApiError;
pub use crate::core::storage::{FileStorage, MemoryStorage, Storage};
pub use crate::models::models::{
    ActionStatus, AuthSession, Comment, CommentWithUser, FollowEdge, Post, PostWithDetails,
    ProfileUpdate, User, UserProfile,
};
pub use crate::session::{AuthState, SessionStore};
