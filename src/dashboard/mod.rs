//! Dashboard module
//!
//! Provides the page for adding transactions, browsing the transaction
//! history and viewing charts of expenses. The history and charts are HTML
//! fragments that the page loads and refreshes with HTMX.

mod charts;
mod form;
mod handlers;
mod table;

pub use handlers::{get_charts_fragment, get_dashboard_page, get_transactions_fragment};
