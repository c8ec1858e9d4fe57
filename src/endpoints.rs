//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the transaction form, transaction history and expense charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The HTML fragment with the filtered transaction history table.
pub const DASHBOARD_TRANSACTIONS: &str = "/dashboard/transactions";
/// The HTML fragment with the expense charts.
pub const DASHBOARD_CHARTS: &str = "/dashboard/charts";

/// The route to create and list transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for expenses summarized by category.
pub const CATEGORY_SUMMARY_API: &str = "/api/transactions/summary/category";
/// The route for expenses summarized by calendar day.
pub const DATE_SUMMARY_API: &str = "/api/transactions/summary/date";
