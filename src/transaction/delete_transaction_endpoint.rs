//! Defines the endpoint for deleting a transaction by its ID.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, Error, transaction::core::delete_transaction};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for a delete request.
#[derive(Debug, Deserialize)]
pub struct DeleteTransactionParams {
    /// The ID of the transaction to delete.
    pub id: Option<i64>,
}

/// A route handler for deleting a transaction by the `id` query parameter.
///
/// Responds with 400 when `id` is absent. Deleting an ID that matches no
/// transaction still succeeds, so repeating a delete is harmless.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Query(params): Query<DeleteTransactionParams>,
) -> Result<Json<Value>, Error> {
    let id = params.id.ok_or(Error::MissingId("Transaction"))?;

    let connection = state.db_connection.lock().unwrap();

    if delete_transaction(id, &connection)? == 0 {
        tracing::debug!("No transaction found with ID {id}, nothing deleted");
    }

    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        category::Category,
        db::initialize,
        transaction::{
            NewTransaction,
            core::{create_transaction, get_all_transactions},
        },
    };

    use super::{DeleteTransactionParams, DeleteTransactionState, delete_transaction_endpoint};

    fn get_test_state() -> DeleteTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction_by_id() {
        let state = get_test_state();
        let transaction = {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                NewTransaction {
                    amount: -50.0,
                    description: "Weekly shop".to_owned(),
                    category: Category::Groceries,
                    date: date!(2024 - 01 - 05),
                },
                &connection,
            )
            .unwrap()
        };

        let result = delete_transaction_endpoint(
            State(state.clone()),
            Query(DeleteTransactionParams {
                id: Some(transaction.id),
            }),
        )
        .await;

        assert!(result.is_ok());
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_all_transactions(&connection).unwrap(), vec![]);
    }

    #[tokio::test]
    async fn missing_id_is_a_bad_request() {
        let state = get_test_state();

        let result = delete_transaction_endpoint(
            State(state),
            Query(DeleteTransactionParams { id: None }),
        )
        .await;

        assert_eq!(result.unwrap_err(), Error::MissingId("Transaction"));
    }

    #[tokio::test]
    async fn deleting_unknown_id_still_succeeds() {
        let state = get_test_state();

        let result = delete_transaction_endpoint(
            State(state),
            Query(DeleteTransactionParams { id: Some(999) }),
        )
        .await;

        assert!(result.is_ok());
    }
}
