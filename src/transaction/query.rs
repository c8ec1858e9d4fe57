//! Database queries for listing transactions.

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{
        core::{Transaction, TransactionType, map_transaction_row, to_unix_millis},
        range::DateRange,
    },
};

/// The filters for listing transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// The days the transactions must fall on.
    pub date_range: DateRange,
    /// Only include transactions of this type, or all types if `None`.
    pub transaction_type: Option<TransactionType>,
}

/// Get the transactions that match `filter`, newest first.
///
/// Transactions on the same date are ordered by ID, newest first, so the
/// most recently created transaction is listed first.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn list_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let lower_bound = filter.date_range.lower_bound().map(to_unix_millis);
    let upper_bound = filter.date_range.upper_bound().map(to_unix_millis);

    tracing::debug!(
        "listing transactions with {filter:?}, date bounds [{lower_bound:?}, {upper_bound:?})"
    );

    connection
        .prepare(
            "SELECT id, type, amount, category, description, date, created_at, updated_at
             FROM \"transaction\"
             WHERE (?1 IS NULL OR date >= ?1)
               AND (?2 IS NULL OR date < ?2)
               AND (?3 IS NULL OR type = ?3)
             ORDER BY date DESC, id DESC",
        )?
        .query_map(
            (lower_bound, upper_bound, filter.transaction_type),
            map_transaction_row,
        )?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}
