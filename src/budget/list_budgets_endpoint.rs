//! Defines the endpoint for listing budgets, optionally filtered by month.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    budget::{Budget, core::get_budgets},
    month::Month,
};

/// The state needed to list budgets.
#[derive(Debug, Clone)]
pub struct ListBudgetsState {
    /// The database connection for reading budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListBudgetsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for a budget listing request.
#[derive(Debug, Default, Deserialize)]
pub struct ListBudgetsParams {
    /// The month to restrict the listing to, as `YYYY-MM`.
    pub month: Option<Month>,
}

/// A route handler for listing budgets.
///
/// When the `month` query parameter is present only budgets for that month
/// are returned, otherwise all budgets are.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_budgets_endpoint(
    State(state): State<ListBudgetsState>,
    Query(params): Query<ListBudgetsParams>,
) -> Result<Json<Vec<Budget>>, Error> {
    let connection = state.db_connection.lock().unwrap();

    let budgets = get_budgets(params.month, &connection)?;

    Ok(Json(budgets))
}
