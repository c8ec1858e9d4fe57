//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_htmx::{HX_TRIGGER, HxRequest};

use crate::{
    Error,
    alert::Alert,
    html::format_currency,
    transaction::{
        core::{Transaction, TransactionPayload, create_transaction},
        state::TransactionState,
    },
};

/// The HTMX event sent to the client after a transaction is created.
///
/// Views that display transactions listen for this event to refresh themselves.
pub const TRANSACTIONS_CHANGED_EVENT: &str = "transactions-changed";

/// A route handler for creating a new transaction.
///
/// Accepts a JSON body or a URL encoded form. API clients get the created
/// transaction as JSON with the status code 201. HTMX requests get an alert
/// and the [TRANSACTIONS_CHANGED_EVENT] event so the dashboard can refresh.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    HxRequest(is_htmx_request): HxRequest,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let result = parse_payload(&headers, &body)
        .and_then(TransactionPayload::into_builder)
        .and_then(|builder| {
            let connection = state
                .db_connection
                .lock()
                .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
                .map_err(|_| Error::DatabaseLockError)?;

            create_transaction(builder, &connection)
        });

    match result {
        Ok(transaction) if is_htmx_request => (
            StatusCode::CREATED,
            [(HX_TRIGGER, TRANSACTIONS_CHANGED_EVENT)],
            created_alert(&transaction).into_html(),
        )
            .into_response(),
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => {
            tracing::warn!("could not create transaction: {error}");

            if is_htmx_request {
                error.into_alert_response()
            } else {
                error.into_response()
            }
        }
    }
}

/// Parse the request body as a form if the content type says so, otherwise as JSON.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> Result<TransactionPayload, Error> {
    let is_form = headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| {
            content_type.starts_with("application/x-www-form-urlencoded")
        });

    if is_form {
        serde_urlencoded::from_bytes(body).map_err(|error| Error::InvalidBody(error.to_string()))
    } else {
        serde_json::from_slice(body).map_err(|error| Error::InvalidBody(error.to_string()))
    }
}

fn created_alert(transaction: &Transaction) -> Alert {
    Alert::Success {
        message: "Transaction added successfully!".to_owned(),
        details: format!(
            "Saved {} of {} in {}.",
            transaction.transaction_type,
            format_currency(transaction.amount),
            transaction.category
        ),
    }
}
