use std::fmt;

/// Failure taxonomy of the data service.
///
/// Only fallback-path failures surface as these; network-path failures
/// are swallowed by the fallback switch and never reach the caller.
#[derive(Debug)]
pub enum ApiError {
    InvalidCredentials,
    UsernameTaken,
    EmailTaken,
    UserNotFound,
    PostNotFound,
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::UsernameTaken => write!(f, "Username already taken"),
            ApiError::EmailTaken => write!(f, "Email already registered"),
            ApiError::UserNotFound => write!(f, "User not found"),
            ApiError::PostNotFound => write!(f, "Post not found"),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
