//! Authentication middleware that validates bearer tokens and binds the user ID to the request.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, UserID, auth::JwtKeys};

/// Find the user that the `Authorization` header in `headers` vouches for.
///
/// The header must be exactly `Bearer <token>`, two parts separated by a single space.
///
/// # Errors
///
/// Returns [Error::MissingAuthHeader] if there is no `Authorization` header,
/// [Error::MalformedAuthHeader] if it does not have the expected shape, or
/// [Error::InvalidToken] if the token does not validate against `keys`.
pub fn authorize(headers: &HeaderMap, keys: &JwtKeys) -> Result<UserID, Error> {
    let header = headers.get(AUTHORIZATION).ok_or(Error::MissingAuthHeader)?;
    let header = header.to_str().map_err(|_| Error::MalformedAuthHeader)?;

    let token = match header.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] => *token,
        _ => return Err(Error::MalformedAuthHeader),
    };

    keys.validate(token)
}

/// Middleware function that checks for a valid bearer token.
///
/// The user ID is placed into the request and then the request executed
/// normally if the token is valid, otherwise an unauthorized error response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(keys): State<JwtKeys>, mut request: Request, next: Next) -> Response {
    match authorize(request.headers(), &keys) {
        Ok(user_id) => {
            request.extensions_mut().insert(user_id);
            next.run(request).await
        }
        Err(error) => {
            tracing::debug!("rejected request to {}: {error}", request.uri().path());
            error.into_response()
        }
    }
}
