//! Application router configuration.

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState, Error,
    budget::{delete_budget_endpoint, list_budgets_endpoint, upsert_budget_endpoint},
    endpoints,
    report::report_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint)
                .post(create_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS,
            get(list_budgets_endpoint)
                .post(upsert_budget_endpoint)
                .delete(delete_budget_endpoint),
        )
        .route(endpoints::REPORTS, get(report_endpoint))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_not_found)
        .with_state(state)
}

/// A liveness probe for deployment checks.
async fn get_health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

async fn get_not_found() -> Error {
    Error::NotFound
}
