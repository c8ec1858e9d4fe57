//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for the dashboard page
//! - The route handlers for the transaction list and chart fragments that the
//!   page loads with HTMX
//! - The state used by the handlers

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error,
    dashboard::{
        charts::{category_chart, charts_view, daily_chart},
        form::transaction_form,
        table::transactions_table,
    },
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        PAGE_CONTAINER_STYLE, PANEL_STYLE, base, panel_error,
    },
    transaction::{
        SummaryQuery, TRANSACTIONS_CHANGED_EVENT, TransactionQuery, list_transactions,
        summarize_by_category, summarize_by_date,
    },
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the dashboard with the form for adding transactions, the
/// transaction history and the expense charts.
///
/// The history and charts are loaded by HTMX once the page has loaded.
pub async fn get_dashboard_page() -> Markup {
    let today = OffsetDateTime::now_utc().date();

    dashboard_view(today)
}

/// Render the table of transactions that match the filters in the query.
///
/// Errors are rendered as a message so that they replace the table.
pub async fn get_transactions_fragment(
    State(state): State<DashboardState>,
    Query(query): Query<TransactionQuery>,
) -> Response {
    tracing::debug!("rendering transactions for {query:?}");

    let transactions = query.to_filter().and_then(|filter| {
        let connection = lock_connection(&state)?;
        list_transactions(&filter, &connection)
    });

    match transactions {
        Ok(transactions) => transactions_table(&transactions).into_response(),
        Err(error) => error_fragment(error, "Could not load transactions"),
    }
}

/// Render the expense charts for the date range in the query.
///
/// Both summaries are read under the same lock, so the charts always agree.
pub async fn get_charts_fragment(
    State(state): State<DashboardState>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    tracing::debug!("rendering charts for {query:?}");

    let summaries = query.to_date_range().and_then(|date_range| {
        let connection = lock_connection(&state)?;
        let by_category = summarize_by_category(date_range, &connection)?;
        let by_date = summarize_by_date(date_range, &connection)?;

        Ok((by_category, by_date))
    });

    match summaries {
        Ok((by_category, by_date)) => {
            charts_view(&[category_chart(&by_category), daily_chart(&by_date)]).into_response()
        }
        Err(error) => error_fragment(error, "Could not load charts"),
    }
}

fn lock_connection(state: &DashboardState) -> Result<std::sync::MutexGuard<'_, Connection>, Error> {
    state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

fn error_fragment(error: Error, summary: &str) -> Response {
    let status = error.status_code();
    let message = format!("{summary}: {}", error.client_message());

    (status, panel_error(&message)).into_response()
}

/// The `hx-trigger` for panels that refresh when their filters change or a
/// transaction is added.
fn refresh_trigger() -> String {
    format!("load, change, {TRANSACTIONS_CHANGED_EVENT} from:body")
}

fn date_filter(name: &str, id: &str, label: &str) -> Markup {
    html! {
        div
        {
            label for=(id) class=(FORM_LABEL_STYLE) { (label) }
            input type="date" name=(name) id=(id) class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn clear_filters_button() -> Markup {
    html! {
        button
            type="button"
            class=(BUTTON_SECONDARY_STYLE)
            "hx-on:click"="this.form.reset(); htmx.trigger(this.form, 'change')"
        {
            "Clear filters"
        }
    }
}

fn transactions_panel() -> Markup {
    html! {
        section id="transactions-panel" class=(PANEL_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Transactions" }

            form
                id="transaction-filters"
                hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                hx-trigger=(refresh_trigger())
                hx-target="#transactions-table"
                hx-target-error="#transactions-table"
                class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end mb-4"
            {
                (date_filter("startDate", "transactions-start-date", "From"))
                (date_filter("endDate", "transactions-end-date", "To"))

                div
                {
                    label for="transactions-type" class=(FORM_LABEL_STYLE) { "Type" }

                    select name="type" id="transactions-type" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected { "All" }
                        option value="income" { "Income" }
                        option value="expense" { "Expense" }
                    }
                }

                (clear_filters_button())
            }

            div id="transactions-table" {}
        }
    }
}

fn charts_panel() -> Markup {
    html! {
        section id="charts-panel" class=(PANEL_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Expenses" }

            form
                id="chart-filters"
                hx-get=(endpoints::DASHBOARD_CHARTS)
                hx-trigger=(refresh_trigger())
                hx-target="#charts"
                hx-target-error="#charts"
                class="grid grid-cols-1 md:grid-cols-3 gap-4 items-end mb-4"
            {
                (date_filter("startDate", "charts-start-date", "From"))
                (date_filter("endDate", "charts-end-date", "To"))
                (clear_filters_button())
            }

            div id="charts" {}
        }
    }
}

fn dashboard_view(today: Date) -> Markup {
    let content = html!(
        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl gap-6"}
        {
            h1 class="text-2xl font-bold self-start" { "Finance Tracker" }

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6 w-full"
            {
                section id="new-transaction" class={(PANEL_STYLE) " lg:col-span-1"}
                {
                    (transaction_form(today))
                }

                div class="lg:col-span-2"
                {
                    (transactions_panel())
                }
            }

            (charts_panel())
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_URL.to_owned())];

    base("Dashboard", &scripts, &content)
}
