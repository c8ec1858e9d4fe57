//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing and querying transactions
//! - Date ranges and the expense summaries grouped by category or by day
//! - The JSON API route handlers

mod core;
mod create_endpoint;
mod list_endpoint;
mod query;
mod range;
mod state;
mod summary;
mod summary_endpoints;

pub use core::{
    DESCRIPTION_MAX_LENGTH, Transaction, TransactionBuilder, TransactionType, count_transactions,
    create_transaction_table,
};
pub use create_endpoint::{TRANSACTIONS_CHANGED_EVENT, create_transaction_endpoint};
pub use list_endpoint::{TransactionQuery, list_transactions_endpoint};
pub use query::list_transactions;
pub use range::{DateRange, end_of_day_exclusive_bound};
pub use summary::{CategoryTotal, DailyTotal, summarize_by_category, summarize_by_date};
pub use summary_endpoints::{SummaryQuery, category_summary_endpoint, date_summary_endpoint};

#[cfg(test)]
pub use core::create_transaction;
