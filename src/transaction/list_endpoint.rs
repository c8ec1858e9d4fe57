//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    Error,
    transaction::{
        core::{Transaction, TransactionType},
        query::{TransactionFilter, list_transactions},
        range::DateRange,
        state::TransactionState,
    },
};

/// The query parameters for listing transactions.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    /// The first day to include as `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// The last day to include as `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

impl TransactionQuery {
    /// Convert the query parameters to a filter.
    ///
    /// A type other than "income" or "expense" is ignored rather than
    /// treated as an error.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if either date is malformed.
    pub fn to_filter(&self) -> Result<TransactionFilter, Error> {
        let date_range = DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())?;
        let transaction_type = self
            .transaction_type
            .as_deref()
            .and_then(|transaction_type| transaction_type.trim().parse::<TransactionType>().ok());

        Ok(TransactionFilter {
            date_range,
            transaction_type,
        })
    }
}

/// A route handler that returns the transactions matching the query as JSON, newest first.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let filter = query.to_filter()?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    list_transactions(&filter, &connection).map(Json)
}


#[cfg(test)]
mod endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        AppState, build_router, endpoints,
        transaction::{Transaction, TransactionType, create_transaction},
    };

    fn get_test_server() -> (TestServer, AppState) {
        let conn = Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(conn).expect("Could not initialize database.");
        let server =
            TestServer::new(build_router(state.clone())).expect("Could not create test server.");

        (server, state)
    }

    fn insert_example_transactions(state: &AppState) {
        let connection = state.db_connection.lock().unwrap();
        create_transaction(
            Transaction::build(TransactionType::Expense, 50.0, "Food")
                .date(datetime!(2024-01-05 00:00 UTC)),
            &connection,
        )
        .unwrap();
        create_transaction(
            Transaction::build(TransactionType::Income, 1000.0, "Salary")
                .date(datetime!(2024-01-06 00:00 UTC)),
            &connection,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn lists_all_transactions_newest_first() {
        let (server, state) = get_test_server();
        insert_example_transactions(&state);

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        let body: Value = response.json();
        let categories: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|transaction| transaction["category"].clone())
            .collect();
        assert_eq!(categories, vec![json!("Salary"), json!("Food")]);
    }

    #[tokio::test]
    async fn filters_by_date_range_and_type() {
        let (server, state) = get_test_server();
        insert_example_transactions(&state);

        let in_range = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("startDate", "2024-01-01")
            .add_query_param("endDate", "2024-01-05")
            .await;
        let incomes = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("type", "income")
            .await;

        let in_range: Value = in_range.json();
        assert_eq!(in_range.as_array().unwrap().len(), 1);
        assert_eq!(in_range[0]["category"], json!("Food"));
        let incomes: Value = incomes.json();
        assert_eq!(incomes.as_array().unwrap().len(), 1);
        assert_eq!(incomes[0]["category"], json!("Salary"));
    }

    #[tokio::test]
    async fn ignores_unknown_type() {
        let (server, state) = get_test_server();
        insert_example_transactions(&state);

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("type", "transfer")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_dates_count_as_absent() {
        let (server, state) = get_test_server();
        insert_example_transactions(&state);

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("startDate", "")
            .add_query_param("endDate", "")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn rejects_malformed_date() {
        let (server, _) = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_query_param("startDate", "not-a-date")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("not-a-date"));
    }

    #[tokio::test]
    async fn created_transaction_is_listed_first() {
        let (server, state) = get_test_server();
        insert_example_transactions(&state);

        let created = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"type": "expense", "amount": "12.5", "category": "Coffee"}))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: Value = created.json();

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        let body: Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0], created);
    }
}
