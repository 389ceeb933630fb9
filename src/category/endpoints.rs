//! Route handlers for creating, listing, renaming and deleting a user's categories.

use axum::{
    Extension, Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    category::{Category, CategoryName},
    database_id::{CreatedId, IdQuery},
    response::ApiResponse,
    stores::Store,
};

/// The request body for creating or renaming a category.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    /// The name of the category, which must not be empty.
    pub name: CategoryName,
}

/// A route handler for creating a category owned by the logged in user.
pub async fn create_category_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<ApiResponse<CreatedId>, Error> {
    let Json(request) = payload?;

    let id = state.store.create_category(user_id, request.name)?;

    Ok(ApiResponse::created(CreatedId { id }))
}

/// A route handler for listing the logged in user's categories.
pub async fn list_categories_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
) -> Result<ApiResponse<Vec<Category>>, Error> {
    state.store.list_categories(user_id).map(ApiResponse::ok)
}

/// A route handler for renaming the category given by `?id=`.
pub async fn update_category_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    query: Result<Query<IdQuery>, QueryRejection>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<StatusCode, Error> {
    let Query(IdQuery { id }) = query?;
    let Json(request) = payload?;

    state.store.update_category(user_id, id, request.name)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for deleting the category given by `?id=`.
pub async fn delete_category_endpoint<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> Result<StatusCode, Error> {
    let Query(IdQuery { id }) = query?;

    state.store.delete_category(user_id, id)?;

    Ok(StatusCode::NO_CONTENT)
}
