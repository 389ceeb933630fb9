//! Defines the app level error type and its conversion into JSON error responses.

use axum::{
    Json,
    extract::rejection::{BytesRejection, JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The classification of an [Error] as seen by API clients.
///
/// Every [Error] maps to exactly one kind, and every kind maps to exactly one
/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent malformed or incomplete input.
    BadRequest,
    /// The request lacked valid credentials or a valid session token.
    Unauthorized,
    /// An owner-scoped mutation matched no rows.
    NotFoundOrForbidden,
    /// The request clashes with existing state.
    Conflict,
    /// The request body is larger than the server accepts.
    PayloadTooLarge,
    /// The backing store failed.
    StorageError,
    /// Hashing or signing failed.
    InternalError,
}

impl ErrorKind {
    /// The HTTP status code used to report this kind of error.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::StorageError | ErrorKind::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body or query string was malformed or missing a required field.
    ///
    /// The string is a short description that is safe to show to the client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the size limit.
    #[error("the request body is too large")]
    PayloadTooLarge,

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The category ID used to create or update a transaction did not match any category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// Only one of the two date range bounds was given.
    #[error("both start_date and end_date must be provided")]
    IncompleteDateRange,

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("could not parse the date \"{0}\", expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The username or password given at log in did not match a registered user.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request had no `Authorization` header.
    #[error("the authorization header is missing")]
    MissingAuthHeader,

    /// The `Authorization` header was not of the form `Bearer <token>`.
    #[error("the authorization header is malformed")]
    MalformedAuthHeader,

    /// The session token failed validation.
    ///
    /// Deliberately carries no detail about why validation failed.
    #[error("invalid token")]
    InvalidToken,

    /// The owner-scoped update or delete matched no rows, either because the
    /// row does not exist or because it belongs to another user.
    #[error("no row found or not authorized")]
    NotFoundOrForbidden,

    /// The username used to register a user is already taken.
    #[error("the username is already in use")]
    DuplicateUsername,

    /// Tried to delete a category that transactions still refer to.
    #[error("the category is still used by one or more transactions")]
    CategoryInUse,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A session token could not be signed.
    #[error("token creation failed: {0}")]
    TokenCreation(String),
}

impl Error {
    /// The client facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadRequest(_)
            | Error::EmptyCategoryName
            | Error::InvalidCategory
            | Error::IncompleteDateRange
            | Error::InvalidDate(_) => ErrorKind::BadRequest,
            Error::InvalidCredentials
            | Error::MissingAuthHeader
            | Error::MalformedAuthHeader
            | Error::InvalidToken => ErrorKind::Unauthorized,
            Error::NotFoundOrForbidden => ErrorKind::NotFoundOrForbidden,
            Error::DuplicateUsername | Error::CategoryInUse => ErrorKind::Conflict,
            Error::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            Error::SqlError(_) | Error::DatabaseLockError => ErrorKind::StorageError,
            Error::HashingError(_) | Error::TokenCreation(_) => ErrorKind::InternalError,
        }
    }

    /// A short, human readable message that is safe to send to the client.
    fn client_message(&self) -> String {
        match self {
            Error::BadRequest(description) => description.clone(),
            Error::InvalidCredentials => "Invalid username or password".to_owned(),
            Error::MissingAuthHeader => "Authorization header missing".to_owned(),
            Error::MalformedAuthHeader => "Invalid Authorization header format".to_owned(),
            Error::InvalidToken => "Invalid token".to_owned(),
            Error::NotFoundOrForbidden => "No row found or not authorized".to_owned(),
            Error::DuplicateUsername => "Failed to create user".to_owned(),
            Error::SqlError(_) | Error::DatabaseLockError => "Internal server error".to_owned(),
            Error::HashingError(_) | Error::TokenCreation(_) => {
                "Internal server error".to_owned()
            }
            error => {
                let mut message = error.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                message
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("users.username") =>
            {
                Error::DuplicateUsername
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Error::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(value: QueryRejection) -> Self {
        Error::BadRequest(value.body_text())
    }
}

impl From<BytesRejection> for Error {
    fn from(value: BytesRejection) -> Self {
        match value.status() {
            StatusCode::PAYLOAD_TOO_LARGE => Error::PayloadTooLarge,
            _ => Error::BadRequest(value.body_text()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();

        if matches!(kind, ErrorKind::StorageError | ErrorKind::InternalError) {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        let status = kind.status_code();
        let body = Json(json!({
            "status_code": status.as_u16(),
            "message": self.client_message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{Error, ErrorKind};

    #[test]
    fn every_kind_has_the_expected_status() {
        let cases = [
            (Error::IncompleteDateRange, StatusCode::BAD_REQUEST),
            (Error::InvalidToken, StatusCode::UNAUTHORIZED),
            (Error::NotFoundOrForbidden, StatusCode::NOT_FOUND),
            (Error::DuplicateUsername, StatusCode::CONFLICT),
            (Error::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (Error::DatabaseLockError, StatusCode::INTERNAL_SERVER_ERROR),
            (
                Error::HashingError("oops".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, want) in cases {
            assert_eq!(error.kind().status_code(), want, "wrong status for {error:?}");
        }
    }

    #[test]
    fn unique_username_violation_maps_to_duplicate_username() {
        let connection = rusqlite::Connection::open_in_memory().unwrap();
        connection
            .execute("CREATE TABLE users (username TEXT UNIQUE NOT NULL)", ())
            .unwrap();
        connection
            .execute("INSERT INTO users (username) VALUES ('alice')", ())
            .unwrap();

        let error: Error = connection
            .execute("INSERT INTO users (username) VALUES ('alice')", ())
            .unwrap_err()
            .into();

        assert_eq!(error, Error::DuplicateUsername);
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn storage_error_response_hides_details() {
        let error = Error::SqlError(rusqlite::Error::InvalidQuery);

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["status_code"], 500);
    }

    #[test]
    fn bad_request_message_is_capitalised() {
        assert_eq!(
            Error::IncompleteDateRange.client_message(),
            "Both start_date and end_date must be provided"
        );
    }
}
