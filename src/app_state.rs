//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{PasswordHash, auth::JwtKeys, stores::Store};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S: Store> {
    /// The store for users, categories, transactions and their aggregates.
    pub store: S,

    /// The keys for signing and verifying session tokens.
    pub jwt_keys: JwtKeys,

    /// The bcrypt cost used when hashing new passwords.
    pub password_cost: u32,
}

impl<S: Store> AppState<S> {
    /// Create a new [AppState] that signs session tokens with `jwt_secret`.
    ///
    /// Passwords are hashed with [PasswordHash::DEFAULT_COST].
    pub fn new(store: S, jwt_secret: &str) -> Self {
        Self {
            store,
            jwt_keys: JwtKeys::new(jwt_secret),
            password_cost: PasswordHash::DEFAULT_COST,
        }
    }

    /// Use `cost` when hashing new passwords.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}

impl<S: Store> FromRef<AppState<S>> for JwtKeys {
    fn from_ref(state: &AppState<S>) -> Self {
        state.jwt_keys.clone()
    }
}
