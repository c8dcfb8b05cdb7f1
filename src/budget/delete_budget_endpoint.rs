//! Defines the endpoint for deleting a budget by its ID.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, Error, budget::core::delete_budget};

/// The state needed to delete a budget.
#[derive(Debug, Clone)]
pub struct DeleteBudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for a delete request.
#[derive(Debug, Deserialize)]
pub struct DeleteBudgetParams {
    /// The ID of the budget to delete.
    pub id: Option<i64>,
}

/// A route handler for deleting a budget by the `id` query parameter.
///
/// Responds with 400 when `id` is absent.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_budget_endpoint(
    State(state): State<DeleteBudgetState>,
    Query(params): Query<DeleteBudgetParams>,
) -> Result<Json<Value>, Error> {
    let id = params.id.ok_or(Error::MissingId("Budget"))?;

    let connection = state.db_connection.lock().unwrap();

    if delete_budget(id, &connection)? == 0 {
        tracing::debug!("No budget found with ID {id}, nothing deleted");
    }

    Ok(Json(json!({ "message": "Budget deleted successfully" })))
}
