use std::sync::Arc;

use gram::config::{TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
use gram::{Api, FileStorage, MemoryStorage, SessionStore, Storage};

const OFFLINE_URL: &str = "http://127.0.0.1:9";

fn offline_api(storage: Arc<MemoryStorage>) -> Api {
    Api::with_base_url(OFFLINE_URL, storage).expect("seed data")
}

#[tokio::test]
async fn fresh_store_is_unauthenticated() {
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionStore::new(storage);

    let state = session.state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn login_persists_both_slots_and_restores() {
    let storage = Arc::new(MemoryStorage::new());
    let api = offline_api(storage.clone());
    let mut session = SessionStore::new(storage.clone());

    session
        .authenticate(&api, "john@example.com", "password123")
        .await;

    let state = session.state();
    assert!(state.is_authenticated);
    assert_eq!(state.user.as_ref().unwrap().id, "1");
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(storage.get_item(USER_STORAGE_KEY).unwrap().is_some());
    assert!(storage.get_item(TOKEN_STORAGE_KEY).unwrap().is_some());

    // A second store over the same storage picks the session back up.
    let restored = SessionStore::new(storage);
    assert!(restored.state().is_authenticated);
    assert_eq!(restored.state().user.as_ref().unwrap().username, "johndoe");
}

#[tokio::test]
async fn failed_login_retains_error_until_cleared() {
    let storage = Arc::new(MemoryStorage::new());
    let api = offline_api(storage.clone());
    let mut session = SessionStore::new(storage.clone());

    session.authenticate(&api, "john@example.com", "wrong").await;

    let state = session.state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    assert!(storage.get_item(USER_STORAGE_KEY).unwrap().is_none());
    assert!(storage.get_item(TOKEN_STORAGE_KEY).unwrap().is_none());

    session.clear_error();
    assert!(session.state().error.is_none());
    assert!(!session.state().is_authenticated);
}

#[tokio::test]
async fn register_enters_an_authenticated_session() {
    let storage = Arc::new(MemoryStorage::new());
    let mut api = offline_api(storage.clone());
    let mut session = SessionStore::new(storage);

    session
        .register(&mut api, "newcomer", "new@example.com", "New Comer", "pw")
        .await;

    let state = session.state();
    assert!(state.is_authenticated);
    assert_eq!(state.user.as_ref().unwrap().id, "4");
    assert!(state.error.is_none());
}

#[tokio::test]
async fn failed_register_reports_the_conflict() {
    let storage = Arc::new(MemoryStorage::new());
    let mut api = offline_api(storage.clone());
    let mut session = SessionStore::new(storage);

    session
        .register(&mut api, "johndoe", "other@example.com", "Other", "pw")
        .await;

    let state = session.state();
    assert!(!state.is_authenticated);
    assert_eq!(state.error.as_deref(), Some("Username already taken"));
}

#[tokio::test]
async fn logout_clears_both_slots_unconditionally() {
    let storage = Arc::new(MemoryStorage::new());
    let api = offline_api(storage.clone());
    let mut session = SessionStore::new(storage.clone());

    session
        .authenticate(&api, "john@example.com", "password123")
        .await;
    assert!(session.state().is_authenticated);

    session.logout();

    let state = session.state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert!(storage.get_item(USER_STORAGE_KEY).unwrap().is_none());
    assert!(storage.get_item(TOKEN_STORAGE_KEY).unwrap().is_none());

    // Logging out twice is fine.
    session.logout();
    assert!(!session.state().is_authenticated);
}

#[tokio::test]
async fn file_storage_round_trips_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let storage = FileStorage::open(&path).unwrap();
    storage.set_item("a", "1").unwrap();
    storage.set_item("b", "2").unwrap();
    storage.remove_item("a").unwrap();

    // Reopen reads what the first handle flushed.
    let reopened = FileStorage::open(&path).unwrap();
    assert_eq!(reopened.get_item("a").unwrap(), None);
    assert_eq!(reopened.get_item("b").unwrap(), Some("2".to_string()));
}

#[tokio::test]
async fn file_backed_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&path).unwrap());
    let api = Api::with_base_url(OFFLINE_URL, storage.clone()).unwrap();
    let mut session = SessionStore::new(storage);
    session
        .authenticate(&api, "alex@example.com", "password123")
        .await;
    assert!(session.state().is_authenticated);

    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&path).unwrap());
    let restored = SessionStore::new(storage);
    assert!(restored.state().is_authenticated);
    assert_eq!(restored.state().user.as_ref().unwrap().username, "alex_smith");
}
