//! Defines the endpoint for creating or replacing a budget.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget::{Budget, NewBudget, core::upsert_budget},
};

/// The state needed to create or replace a budget.
#[derive(Debug, Clone)]
pub struct UpsertBudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpsertBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a budget, or replacing the amount of the
/// budget that already exists for the same (category, month) pair.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn upsert_budget_endpoint(
    State(state): State<UpsertBudgetState>,
    Json(new_budget): Json<NewBudget>,
) -> Result<(StatusCode, Json<Budget>), Error> {
    let connection = state.db_connection.lock().unwrap();

    let budget = upsert_budget(new_budget, &connection)?;

    Ok((StatusCode::CREATED, Json(budget)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{
        budget::{NewBudget, core::get_budgets},
        category::Category,
        db::initialize,
    };

    use super::{UpsertBudgetState, upsert_budget_endpoint};

    fn get_test_state() -> UpsertBudgetState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        UpsertBudgetState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn can_create_budget() {
        let state = get_test_state();
        let new_budget = NewBudget {
            category: Category::Groceries,
            amount: 100.0,
            month: "2024-01".parse().unwrap(),
        };

        let (status, Json(created)) = upsert_budget_endpoint(State(state.clone()), Json(new_budget))
            .await
            .expect("Could not create budget");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.category, Category::Groceries);
        assert_eq!(created.amount, 100.0);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_budgets(None, &connection).unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn posting_twice_keeps_one_record_with_the_latter_amount() {
        let state = get_test_state();
        let budget = |amount| NewBudget {
            category: Category::Groceries,
            amount,
            month: "2024-01".parse().unwrap(),
        };

        upsert_budget_endpoint(State(state.clone()), Json(budget(100.0)))
            .await
            .unwrap();
        upsert_budget_endpoint(State(state.clone()), Json(budget(250.0)))
            .await
            .unwrap();

        let connection = state.db_connection.lock().unwrap();
        let stored = get_budgets(None, &connection).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].amount, 250.0);
    }
}
