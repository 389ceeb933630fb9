//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{
    AppState,
    analytics::{
        get_category_totals, get_category_totals_filtered, get_income_and_expenses,
        get_income_and_expenses_filtered,
    },
    auth::{auth_guard, log_in, register_user},
    category::{
        create_category_endpoint, delete_category_endpoint, list_categories_endpoint,
        update_category_endpoint,
    },
    endpoints,
    stores::Store,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route except registration and log in requires a bearer token.
pub fn build_router<S: Store>(state: AppState<S>) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::REGISTER, post(register_user::<S>))
        .route(endpoints::LOG_IN, post(log_in::<S>));

    let protected_routes = Router::new()
        .route(endpoints::CATEGORIES, post(create_category_endpoint::<S>))
        .route(endpoints::LIST_CATEGORIES, get(list_categories_endpoint::<S>))
        .route(endpoints::UPDATE_CATEGORY, put(update_category_endpoint::<S>))
        .route(endpoints::DELETE_CATEGORY, delete(delete_category_endpoint::<S>))
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint::<S>))
        .route(
            endpoints::LIST_TRANSACTIONS,
            get(list_transactions_endpoint::<S>),
        )
        .route(
            endpoints::UPDATE_TRANSACTION,
            put(update_transaction_endpoint::<S>),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint::<S>),
        )
        .route(endpoints::INCOME_EXPENSES, get(get_income_and_expenses::<S>))
        .route(endpoints::CATEGORY_TOTALS, get(get_category_totals::<S>))
        .route(
            endpoints::INCOME_EXPENSES_FILTERED,
            get(get_income_and_expenses_filtered::<S>),
        )
        .route(
            endpoints::CATEGORY_TOTALS_FILTERED,
            get(get_category_totals_filtered::<S>),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The JSON error response for routes that do not exist.
async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status_code": StatusCode::NOT_FOUND.as_u16(),
            "message": "Not found",
        })),
    )
        .into_response()
}
