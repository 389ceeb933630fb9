//! Exchanges a username and password for a session token.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, auth::Credentials, response::ApiResponse, stores::Store};

/// The response data for a successful log in.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogInResponse {
    /// The session token to send as `Authorization: Bearer <token>`.
    pub token: String,
}

/// A route handler for logging in a user.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the username is unknown or the
/// password is wrong. The two cases are indistinguishable to the client.
pub async fn log_in<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<ApiResponse<LogInResponse>, Error> {
    let Json(credentials) = payload?;

    let user = state
        .store
        .get_user_by_username(&credentials.username)?
        .ok_or(Error::InvalidCredentials)?;

    if !user.password_hash.verify(&credentials.password)? {
        return Err(Error::InvalidCredentials);
    }

    let token = state.jwt_keys.issue(user.id)?;

    Ok(ApiResponse::ok(LogInResponse { token }))
}
