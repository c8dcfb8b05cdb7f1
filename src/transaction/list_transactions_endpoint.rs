//! Defines the endpoint for listing transactions a page at a time.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    pagination::{PageQuery, PaginationConfig},
    transaction::{Transaction, core::get_transaction_page},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls paging defaults.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// A route handler for getting one page of transactions, sorted by date with
/// the most recent first.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(page_query): Query<PageQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let bounds = page_query.bounds(&state.pagination_config);
    let connection = state.db_connection.lock().unwrap();

    let transactions = get_transaction_page(&bounds, &connection)?;

    Ok(Json(transactions))
}
