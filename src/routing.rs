//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    dashboard::{get_charts_fragment, get_dashboard_page, get_transactions_fragment},
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        category_summary_endpoint, create_transaction_endpoint, date_summary_endpoint,
        list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let view_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::DASHBOARD_TRANSACTIONS,
            get(get_transactions_fragment),
        )
        .route(endpoints::DASHBOARD_CHARTS, get(get_charts_fragment));

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint).get(list_transactions_endpoint),
        )
        .route(
            endpoints::CATEGORY_SUMMARY_API,
            get(category_summary_endpoint),
        )
        .route(endpoints::DATE_SUMMARY_API, get(date_summary_endpoint))
        // The API may be called from clients served on other origins.
        .layer(CorsLayer::permissive());

    view_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
