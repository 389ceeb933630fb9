//! Route handlers for creating, listing, updating and deleting a user's transactions.

use axum::{
    Extension, Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, UserID,
    category::CategoryId,
    database_id::{CreatedId, IdQuery},
    response::ApiResponse,
    stores::Store,
    transaction::{Transaction, TransactionFields},
};

/// The request body for creating or updating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// The amount of money earned (positive) or spent (negative).
    pub amount: f64,
    /// When the transaction happened, today (UTC) if left out.
    #[serde(default)]
    pub date: Option<Date>,
    /// What the transaction was for.
    #[serde(default)]
    pub description: String,
    /// The category to file the transaction under.
    pub category_id: CategoryId,
}

impl From<TransactionRequest> for TransactionFields {
    fn from(request: TransactionRequest) -> Self {
        Self {
            amount: request.amount,
            date: request
                .date
                .unwrap_or_else(|| OffsetDateTime::now_utc().date()),
            description: request.description,
            category_id: request.category_id,
        }
    }
}

/// A route handler for creating a transaction owned by the logged in user.
pub async fn create_transaction_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<ApiResponse<CreatedId>, Error> {
    let Json(request) = payload?;

    let id = state.store.create_transaction(user_id, request.into())?;

    Ok(ApiResponse::created(CreatedId { id }))
}

/// A route handler for listing the logged in user's transactions.
pub async fn list_transactions_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
) -> Result<ApiResponse<Vec<Transaction>>, Error> {
    state.store.list_transactions(user_id).map(ApiResponse::ok)
}

/// A route handler for overwriting the transaction given by `?id=`.
pub async fn update_transaction_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<StatusCode, Error> {
    let Query(IdQuery { id }) = query?;
    let Json(request) = payload?;

    state.store.update_transaction(user_id, id, request.into())?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for deleting the transaction given by `?id=`.
pub async fn delete_transaction_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<StatusCode, Error> {
    let Query(IdQuery { id }) = query?;

    state.store.delete_transaction(user_id, id)?;

    Ok(StatusCode::NO_CONTENT)
}
