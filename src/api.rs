use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;
use crate::core::db;
use crate::core::storage::{self, Storage};
use crate::models::models::{Comment, FollowEdge, Post, User, UserProfile};

/// The mock data service.
///
/// Every operation is shaped like a remote call: it first issues a real
/// HTTP request against the configured base URL, and on any failure
/// (transport error, non-2xx status, undecodable body) silently computes
/// the same result over the in-memory collections after a fixed
/// artificial delay. Callers cannot tell the two paths apart except by
/// latency.
///
/// The collections are owned by this struct and never exposed; mutating
/// operations take `&mut self`, so an edge-set edit and its denormalized
/// counters always change inside one exclusive critical section.
pub struct Api {
    base_url: String,
    client: reqwest::Client,
    storage: Arc<dyn Storage>,
    pub(crate) users: Vec<User>,
    pub(crate) posts: Vec<Post>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) follows: Vec<FollowEdge>,
    pub(crate) allow_self_follow: bool,
}

/// Why a network attempt was abandoned. Internal only: the fallback
/// switch logs it and the caller never sees it.
pub(crate) enum RemoteError {
    Status(StatusCode),
    Transport(reqwest::Error),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Status(status) => write!(f, "HTTP error {}", status.as_u16()),
            RemoteError::Transport(err) => write!(f, "{}", err),
        }
    }
}

impl Api {
    /// Service with the base URL from the environment and the demo
    /// fixture loaded.
    pub fn new(storage: Arc<dyn Storage>) -> anyhow::Result<Self> {
        Self::with_base_url(config::api_base_url(), storage)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        storage: Arc<dyn Storage>,
    ) -> anyhow::Result<Self> {
        let seed = db::demo_data()?;
        Ok(Api {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            storage,
            users: seed.users,
            posts: seed.posts,
            comments: seed.comments,
            follows: seed.follows,
            allow_self_follow: true,
        })
    }

    /// Whether `follow(x, x)` inserts a real edge. Defaults to `true`;
    /// when disabled, a self-follow is accepted but changes nothing.
    pub fn set_allow_self_follow(&mut self, allow: bool) {
        self.allow_self_follow = allow;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_remote<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        Self::run(self.client.get(self.url(path))).await
    }

    pub(crate) async fn post_remote<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, RemoteError> {
        Self::run(self.client.post(self.url(path)).json(body)).await
    }

    /// POST without a body (follow/unfollow and like/unlike carry their
    /// arguments in the path).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        Self::run(self.client.post(self.url(path))).await
    }

    pub(crate) async fn put_remote<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, RemoteError> {
        Self::run(self.client.put(self.url(path)).json(body)).await
    }

    async fn run<T: DeserializeOwned>(req: reqwest::RequestBuilder) -> Result<T, RemoteError> {
        let resp = req
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        resp.json::<T>().await.map_err(RemoteError::Transport)
    }

    /// Fixed artificial latency of the fallback path, so UI state
    /// handling sees network-like timing even when offline.
    pub(crate) async fn simulate_latency(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    /// The persisted session identity, if any. Read from client storage
    /// on every use so relationship flags track the live session; an
    /// unreadable slot counts as no session.
    pub(crate) fn current_user(&self) -> Option<UserProfile> {
        storage::get_json(self.storage.as_ref(), config::USER_STORAGE_KEY)
            .ok()
            .flatten()
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Record ids are the decimal string of the collection length + 1.
    /// Nothing is ever deleted, so this is a per-collection monotonic
    /// counter.
    pub(crate) fn next_id(len: usize) -> String {
        (len + 1).to_string()
    }
}
