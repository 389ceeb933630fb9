//! The JSON envelope wrapped around successful responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// A successful response, serialized as `{"status_code": ..., "data": ...}`.
///
/// Errors use [Error](crate::Error) instead, which puts a `message` in place of `data`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 OK response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// A 201 Created response carrying `data`.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status_code": self.status.as_u16(),
            "data": self.data,
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use super::ApiResponse;

    #[tokio::test]
    async fn created_response_has_envelope() {
        let response = ApiResponse::created(json!({"id": 1})).into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"status_code": 201, "data": {"id": 1}}));
    }
}
