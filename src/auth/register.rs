//! Registers new users.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, PasswordHash, UserID, response::ApiResponse, stores::Store};

/// The username and password entered during registration or log in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// The name the user logs in with.
    pub username: String,
    /// The user's raw password.
    pub password: String,
}

/// The response data for a newly registered user.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    /// The ID of the new user.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: String,
}

/// A route handler for registering a new user.
///
/// # Errors
///
/// Returns a bad request error if the username or password is empty, and a
/// conflict error if the username is taken.
pub async fn register_user<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<ApiResponse<RegisteredUser>, Error> {
    let Json(credentials) = payload?;

    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(Error::BadRequest(
            "Username and password are required".to_owned(),
        ));
    }

    let password_hash = PasswordHash::new(&credentials.password, state.password_cost)?;
    let id = state
        .store
        .create_user(&credentials.username, password_hash)
        .inspect_err(|error| tracing::warn!("could not create user: {error}"))?;

    Ok(ApiResponse::created(RegisteredUser {
        id,
        username: credentials.username,
    }))
}
