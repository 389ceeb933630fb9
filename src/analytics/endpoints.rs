//! Route handlers for the logged in user's income, expense and category totals.

use axum::{
    Extension,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    analytics::{CategoryTotal, DateRange, IncomeAndExpenses},
    response::ApiResponse,
    stores::Store,
};

/// The `?start_date=&end_date=` query string for the filtered analytics routes.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    /// The first date to include, as `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// The last date to include, as `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    /// Both dates are required by the filtered routes.
    fn require_range(&self) -> Result<DateRange, Error> {
        DateRange::from_query(self.start_date.as_deref(), self.end_date.as_deref())?
            .ok_or(Error::IncompleteDateRange)
    }
}

/// A route handler for the user's total income and expenses.
pub async fn get_income_and_expenses<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
) -> Result<ApiResponse<IncomeAndExpenses>, Error> {
    state
        .store
        .income_and_expenses(user_id, None)
        .map(ApiResponse::ok)
}

/// A route handler for the user's per category totals.
pub async fn get_category_totals<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
) -> Result<ApiResponse<Vec<CategoryTotal>>, Error> {
    state
        .store
        .category_totals(user_id, None)
        .map(ApiResponse::ok)
}

/// A route handler for the user's total income and expenses between two dates.
pub async fn get_income_and_expenses_filtered<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<ApiResponse<IncomeAndExpenses>, Error> {
    let Query(query) = query?;
    let date_range = query.require_range()?;

    state
        .store
        .income_and_expenses(user_id, Some(date_range))
        .map(ApiResponse::ok)
}

/// A route handler for the user's per category totals between two dates.
pub async fn get_category_totals_filtered<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user_id): Extension<UserID>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<CategoryTotal>>, Error> {
    let Query(query) = query?;
    let date_range = query.require_range()?;

    state
        .store
        .category_totals(user_id, Some(date_range))
        .map(ApiResponse::ok)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{get_test_server, log_in_as},
    };

    async fn add(server: &TestServer, token: &str, category_id: i64, amount: f64, date: &str) {
        server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(token)
            .json(&json!({
                "amount": amount,
                "date": date,
                "description": "",
                "category_id": category_id
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    async fn create_category(server: &TestServer, token: &str, name: &str) -> i64 {
        server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(token)
            .json(&json!({"name": name}))
            .await
            .json::<Value>()["data"]["id"]
            .as_i64()
            .unwrap()
    }

    #[tokio::test]
    async fn empty_totals_are_zero() {
        let server = get_test_server();
        let token = log_in_as(&server, "alice").await;

        let response = server
            .get(endpoints::INCOME_EXPENSES)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({"status_code": 200, "data": {"total_income": 0.0, "total_expense": 0.0}})
        );
    }

    #[tokio::test]
    async fn groceries_scenario() {
        let server = get_test_server();
        let token = log_in_as(&server, "alice").await;
        let groceries = create_category(&server, &token, "Groceries").await;
        add(&server, &token, groceries, -42.5, "2024-03-09").await;

        let totals = server
            .get(endpoints::INCOME_EXPENSES)
            .authorization_bearer(&token)
            .await
            .json::<Value>();
        let categories = server
            .get(endpoints::CATEGORY_TOTALS)
            .authorization_bearer(&token)
            .await
            .json::<Value>();

        assert_eq!(
            totals["data"],
            json!({"total_income": 0.0, "total_expense": -42.5})
        );
        assert_eq!(
            categories["data"],
            json!([{"category_name": "Groceries", "total_amount": -42.5}])
        );
    }

    #[tokio::test]
    async fn filtered_totals_only_include_dates_in_range() {
        let server = get_test_server();
        let token = log_in_as(&server, "alice").await;
        let category_id = create_category(&server, &token, "Misc").await;
        add(&server, &token, category_id, 100.0, "2024-01-01").await;
        add(&server, &token, category_id, -10.0, "2024-01-31").await;
        add(&server, &token, category_id, 999.0, "2024-02-01").await;

        let totals = server
            .get(endpoints::INCOME_EXPENSES_FILTERED)
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-01-31")
            .authorization_bearer(&token)
            .await
            .json::<Value>();
        let categories = server
            .get(endpoints::CATEGORY_TOTALS_FILTERED)
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-01-31")
            .authorization_bearer(&token)
            .await
            .json::<Value>();

        assert_eq!(
            totals["data"],
            json!({"total_income": 100.0, "total_expense": -10.0})
        );
        assert_eq!(
            categories["data"],
            json!([{"category_name": "Misc", "total_amount": 90.0}])
        );
    }

    #[tokio::test]
    async fn only_start_date_is_bad_request() {
        let server = get_test_server();
        let token = log_in_as(&server, "alice").await;

        for endpoint in [
            endpoints::INCOME_EXPENSES_FILTERED,
            endpoints::CATEGORY_TOTALS_FILTERED,
        ] {
            server
                .get(endpoint)
                .add_query_param("start_date", "2024-01-01")
                .authorization_bearer(&token)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn missing_or_invalid_dates_are_bad_request() {
        let server = get_test_server();
        let token = log_in_as(&server, "alice").await;

        server
            .get(endpoints::INCOME_EXPENSES_FILTERED)
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get(endpoints::CATEGORY_TOTALS_FILTERED)
            .add_query_param("start_date", "yesterday")
            .add_query_param("end_date", "2024-01-31")
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn analytics_require_a_token() {
        let server = get_test_server();

        server
            .get(endpoints::CATEGORY_TOTALS)
            .authorization_bearer("garbage")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
