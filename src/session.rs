use std::sync::Arc;

use log::warn;

use crate::api::Api;
use crate::config;
use crate::core::storage::{self, Storage};
use crate::models::models::{AuthSession, UserProfile};

/// Observable session state. The four fields project the store's state
/// machine: `loading` is the Loading state, `error` the Error state
/// (retained until [`SessionStore::clear_error`]), and
/// `is_authenticated`/`user` move together.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    fn unauthenticated() -> Self {
        AuthState {
            is_authenticated: false,
            user: None,
            loading: false,
            error: None,
        }
    }

    fn authenticated(user: UserProfile) -> Self {
        AuthState {
            is_authenticated: true,
            user: Some(user),
            loading: false,
            error: None,
        }
    }
}

/// Client-side holder of the authenticated identity, persisted in two
/// storage slots (profile JSON + bearer token). Both slots present means
/// authenticated; they are always written and cleared together.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    state: AuthState,
}

impl SessionStore {
    /// Restores any persisted session: both slots readable puts the
    /// store straight into Authenticated, anything else into
    /// Unauthenticated.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let mut store = SessionStore {
            storage,
            state: AuthState {
                is_authenticated: false,
                user: None,
                loading: true,
                error: None,
            },
        };
        store.restore();
        store
    }

    fn restore(&mut self) {
        let user = storage::get_json::<UserProfile>(self.storage.as_ref(), config::USER_STORAGE_KEY)
            .ok()
            .flatten();
        let token = self
            .storage
            .get_item(config::TOKEN_STORAGE_KEY)
            .ok()
            .flatten();

        self.state = match (user, token) {
            (Some(user), Some(_)) => AuthState::authenticated(user),
            _ => AuthState::unauthenticated(),
        };
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Loading → Authenticated (persisting both slots) or Loading →
    /// Error. The outcome is observed through [`SessionStore::state`],
    /// the way the UI consumes it.
    pub async fn authenticate(&mut self, api: &Api, email: &str, password: &str) {
        self.state.loading = true;
        self.state.error = None;

        match api.authenticate(email, password).await {
            Ok(session) => self.enter(session),
            Err(err) => {
                self.state.loading = false;
                self.state.error = Some(err.to_string());
            }
        }
    }

    pub async fn register(
        &mut self,
        api: &mut Api,
        username: &str,
        email: &str,
        fullname: &str,
        password: &str,
    ) {
        self.state.loading = true;
        self.state.error = None;

        match api.register(username, email, fullname, password).await {
            Ok(session) => self.enter(session),
            Err(err) => {
                self.state.loading = false;
                self.state.error = Some(err.to_string());
            }
        }
    }

    fn enter(&mut self, session: AuthSession) {
        let persisted =
            storage::set_json(self.storage.as_ref(), config::USER_STORAGE_KEY, &session.user)
                .and_then(|_| {
                    self.storage
                        .set_item(config::TOKEN_STORAGE_KEY, &session.token)
                });

        match persisted {
            Ok(()) => self.state = AuthState::authenticated(session.user),
            Err(err) => {
                self.state.loading = false;
                self.state.error = Some(err.to_string());
            }
        }
    }

    /// Unconditional: clears both slots and returns to Unauthenticated
    /// even if storage removal fails.
    pub fn logout(&mut self) {
        if let Err(err) = self.storage.remove_item(config::USER_STORAGE_KEY) {
            warn!("failed to clear session slot: {}", err);
        }
        if let Err(err) = self.storage.remove_item(config::TOKEN_STORAGE_KEY) {
            warn!("failed to clear token slot: {}", err);
        }
        self.state = AuthState::unauthenticated();
    }

    /// Drops a retained error message without touching authentication
    /// state.
    pub fn clear_error(&mut self) {
        self.state.error = None;
    }
}
