use axum_test::TestResponse;
use rusqlite::Connection;
use serde_json::Value;

use crate::AppState;

/// App state backed by an in-memory database, with a cheap password cost.
pub(crate) fn get_test_app_state() -> AppState {
    AppState::new(Connection::open_in_memory().unwrap(), "foobar")
        .unwrap()
        .with_password_cost(4)
}

#[track_caller]
pub(crate) fn assert_message(response: &TestResponse, message: &str) {
    let body = response.json::<Value>();

    assert_eq!(
        body["message"], message,
        "want message {message:?}, got body {body}"
    );
}
