//! Defines the endpoints for the expense summaries.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    transaction::{
        range::DateRange,
        state::TransactionState,
        summary::{CategoryTotal, DailyTotal, summarize_by_category, summarize_by_date},
    },
};

/// The query parameters for the summary endpoints.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// The first day to include as `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// The last day to include as `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl SummaryQuery {
    /// Parse the dates in the query.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if either date is malformed.
    pub fn to_date_range(&self) -> Result<DateRange, Error> {
        DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// A route handler that returns the expense totals per category, largest first.
pub async fn category_summary_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    let date_range = query.to_date_range()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    summarize_by_category(date_range, &connection).map(Json)
}

/// A route handler that returns the expense totals per day, earliest first.
pub async fn date_summary_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<DailyTotal>>, Error> {
    let date_range = query.to_date_range()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    summarize_by_date(date_range, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, endpoints};

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(conn).expect("Could not initialize database.");

        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    async fn create_example_transactions(server: &TestServer) {
        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"type": "expense", "amount": 50, "category": "Food", "date": "2024-01-05"}))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"type": "income", "amount": 1000, "category": "Salary", "date": "2024-01-06"}))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn category_summary_for_example() {
        let server = get_test_server();
        create_example_transactions(&server).await;

        let response = server
            .get(endpoints::CATEGORY_SUMMARY_API)
            .add_query_param("startDate", "2024-01-01")
            .add_query_param("endDate", "2024-01-05")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([{"category": "Food", "totalAmount": 50.0}]));
    }

    #[tokio::test]
    async fn date_summary_for_example() {
        let server = get_test_server();
        create_example_transactions(&server).await;

        let response = server
            .get(endpoints::DATE_SUMMARY_API)
            .add_query_param("startDate", "2024-01-01")
            .add_query_param("endDate", "2024-01-05")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([{"date": "2024-01-05", "totalAmount": 50.0}]));
    }

    #[tokio::test]
    async fn summaries_without_range_exclude_income() {
        let server = get_test_server();
        create_example_transactions(&server).await;

        let by_category: Value = server.get(endpoints::CATEGORY_SUMMARY_API).await.json();
        let by_date: Value = server.get(endpoints::DATE_SUMMARY_API).await.json();

        assert_eq!(by_category, json!([{"category": "Food", "totalAmount": 50.0}]));
        assert_eq!(by_date, json!([{"date": "2024-01-05", "totalAmount": 50.0}]));
    }

    #[tokio::test]
    async fn empty_range_returns_empty_arrays() {
        let server = get_test_server();
        create_example_transactions(&server).await;

        let by_category = server
            .get(endpoints::CATEGORY_SUMMARY_API)
            .add_query_param("startDate", "2025-01-01")
            .await;
        let by_date = server
            .get(endpoints::DATE_SUMMARY_API)
            .add_query_param("startDate", "2025-01-01")
            .await;

        by_category.assert_status_ok();
        by_category.assert_json(&json!([]));
        by_date.assert_status_ok();
        by_date.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn rejects_malformed_dates() {
        let server = get_test_server();

        let by_category = server
            .get(endpoints::CATEGORY_SUMMARY_API)
            .add_query_param("endDate", "2024-1-5x")
            .await;
        let by_date = server
            .get(endpoints::DATE_SUMMARY_API)
            .add_query_param("startDate", "soon")
            .await;

        by_category.assert_status(StatusCode::BAD_REQUEST);
        by_date.assert_status(StatusCode::BAD_REQUEST);
    }
}
