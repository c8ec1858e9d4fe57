//! A personal finance tracker for recording income and expenses.
//!
//! This library provides a JSON REST API for creating and querying
//! transactions, summaries of expenses grouped by category or by day, and a
//! server-rendered dashboard that uses the API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod logging;
mod not_found;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    CategoryTotal, DailyTotal, DateRange, Transaction, TransactionBuilder, TransactionType,
    count_transactions, end_of_day_exclusive_bound,
};

use crate::{alert::Alert, transaction::DESCRIPTION_MAX_LENGTH};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more of the fields `type`, `amount` and `category` were missing
    /// or empty when creating a transaction.
    #[error("Please include all required fields: type, amount, category")]
    MissingFields,

    /// The transaction type was not one of "income" or "expense".
    #[error("Type must be either \"income\" or \"expense\", got \"{0}\"")]
    InvalidType(String),

    /// The amount could not be parsed as a finite number.
    #[error("Amount must be a number, got \"{0}\"")]
    InvalidAmount(String),

    /// A negative amount was used to create a transaction.
    ///
    /// Whether money was spent or earned is recorded by the transaction type,
    /// so amounts are always zero or greater.
    #[error("Amount cannot be negative, got {0}")]
    NegativeAmount(f64),

    /// The description is longer than [DESCRIPTION_MAX_LENGTH] characters.
    ///
    /// Holds the length of the rejected description.
    #[error("Description can be at most {max} characters, got {0}", max = DESCRIPTION_MAX_LENGTH)]
    DescriptionTooLong(usize),

    /// A date could not be parsed.
    ///
    /// Query parameters expect `YYYY-MM-DD`, transaction dates also accept
    /// RFC 3339 timestamps.
    #[error("\"{0}\" is not a valid date, expected a date formatted as YYYY-MM-DD")]
    InvalidDate(String),

    /// The request body could not be parsed as JSON or as a URL encoded form.
    #[error("Could not parse the request body: {0}")]
    InvalidBody(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

/// The JSON body sent to API clients when a request fails.
#[derive(Debug, Serialize)]
struct ErrorMessage {
    message: String,
}

impl Error {
    /// The HTTP status code that best describes this error.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingFields
            | Error::InvalidType(_)
            | Error::InvalidAmount(_)
            | Error::NegativeAmount(_)
            | Error::DescriptionTooLong(_)
            | Error::InvalidDate(_)
            | Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message that is safe to show to the client.
    ///
    /// Internal errors are logged and replaced with a generic message.
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("An unexpected error occurred: {}", self);
                "Server Error".to_owned()
            }
            _ => self.to_string(),
        }
    }

    /// Render the error as an alert for HTMX requests.
    fn into_alert_response(self) -> Response {
        let status = self.status_code();
        let alert = match status {
            StatusCode::INTERNAL_SERVER_ERROR => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            },
            _ => Alert::Error {
                message: "Could not save transaction".to_owned(),
                details: self.client_message(),
            },
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, alert.into_html()).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.client_message();

        (status, Json(ErrorMessage { message })).into_response()
    }
}
