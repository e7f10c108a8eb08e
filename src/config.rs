/// Storage slot holding the JSON-serialized session profile.
pub const USER_STORAGE_KEY: &str = "gram_user";

/// Storage slot holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "gram_token";

/// Placeholder bearer token. There is no real token issuance; both the
/// remote contract and the fallback hand back this fixed string.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

pub const DEFAULT_API_URL: &str = "https://api.example.com";

pub fn api_base_url() -> String {
    std::env::var("GRAM_API_URL")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
