#![allow(missing_docs)]

use axum::middleware;
use axum_test::TestServer;
use serde_json::{Value, json};

use crate::{
    AppState, build_router, endpoints, logging_middleware,
    stores::{MemoryStore, SQLiteStore, Store},
};

pub(crate) const TEST_SECRET: &str = "test secret";

/// The lowest cost bcrypt accepts, to keep the tests fast.
pub(crate) const TEST_PASSWORD_COST: u32 = 4;

fn get_test_state<S: Store>(store: S) -> AppState<S> {
    AppState::new(store, TEST_SECRET).with_password_cost(TEST_PASSWORD_COST)
}

pub(crate) fn get_test_server_with_store<S: Store>(store: S) -> TestServer {
    TestServer::new(build_router(get_test_state(store)))
}

/// A test server wrapped in [logging_middleware] the same way the server binary does it.
pub(crate) fn get_logged_test_server_with_store<S: Store>(store: S) -> TestServer {
    let router =
        build_router(get_test_state(store)).layer(middleware::from_fn(logging_middleware));

    TestServer::new(router)
}

/// A test server backed by an empty [MemoryStore].
pub(crate) fn get_test_server() -> TestServer {
    get_test_server_with_store(MemoryStore::new())
}

/// A test server backed by an empty in-memory SQLite database.
pub(crate) fn get_sqlite_test_server() -> TestServer {
    let connection =
        rusqlite::Connection::open_in_memory().expect("Could not open database in memory.");
    let store = SQLiteStore::open(connection).expect("Could not initialize database.");

    get_test_server_with_store(store)
}

/// Register `username` and log them in, returning their session token.
pub(crate) async fn log_in_as(server: &TestServer, username: &str) -> String {
    let credentials = json!({"username": username, "password": "secret1"});

    server
        .post(endpoints::REGISTER)
        .json(&credentials)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server
        .post(endpoints::LOG_IN)
        .json(&credentials)
        .await
        .json::<Value>()["data"]["token"]
        .as_str()
        .expect("log in response should contain a token")
        .to_owned()
}
