//! Defines the core data models and database queries for budgets.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, category::Category, month::Month};

// ============================================================================
// MODELS
// ============================================================================

/// A spending ceiling for one category in one calendar month.
///
/// At most one budget exists per (category, month) pair; writing a second one
/// replaces the amount of the first. The invariant is enforced by a unique
/// index plus upsert-on-conflict SQL rather than application logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: i64,
    /// The category the budget applies to.
    pub category: Category,
    /// The monthly spending limit.
    pub amount: f64,
    /// The month the budget applies to.
    pub month: Month,
}

/// The data needed to create or replace a budget.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    /// The category the budget applies to.
    pub category: Category,
    /// The monthly spending limit.
    pub amount: f64,
    /// The month the budget applies to.
    pub month: Month,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the budget for a (category, month) pair, or replace its amount if
/// one already exists.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn upsert_budget(new_budget: NewBudget, connection: &Connection) -> Result<Budget, Error> {
    let budget = connection
        .prepare(
            "INSERT INTO budget (category, amount, month) VALUES (?1, ?2, ?3)
             ON CONFLICT(category, month) DO UPDATE SET amount = excluded.amount
             RETURNING id, category, amount, month",
        )?
        .query_row(
            (new_budget.category, new_budget.amount, new_budget.month),
            map_budget_row,
        )?;

    Ok(budget)
}

/// Get budgets, optionally restricted to a single month.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_budgets(month: Option<Month>, connection: &Connection) -> Result<Vec<Budget>, Error> {
    match month {
        Some(month) => connection
            .prepare("SELECT id, category, amount, month FROM budget WHERE month = :month")?
            .query_map(&[(":month", &month)], map_budget_row)?
            .map(|row_result| row_result.map_err(Error::from))
            .collect(),
        None => connection
            .prepare("SELECT id, category, amount, month FROM budget")?
            .query_map([], map_budget_row)?
            .map(|row_result| row_result.map_err(Error::from))
            .collect(),
    }
}

/// Delete the budget with `id` from the database.
///
/// Returns the number of rows deleted, which is zero when `id` does not refer
/// to a budget.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_budget(id: i64, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM budget WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                month TEXT NOT NULL,
                UNIQUE(category, month)
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Budget].
fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        category: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;

    use crate::{
        budget::{
            NewBudget,
            core::{delete_budget, get_budgets, upsert_budget},
        },
        category::Category,
        db::initialize,
        month::Month,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn month(text: &str) -> Month {
        text.parse().expect("Could not parse month")
    }

    #[test]
    fn upsert_creates_budget() {
        let conn = get_test_connection();

        let budget = upsert_budget(
            NewBudget {
                category: Category::Groceries,
                amount: 100.0,
                month: month("2024-01"),
            },
            &conn,
        )
        .expect("Could not create budget");

        assert!(budget.id > 0);
        assert_eq!(budget.category, Category::Groceries);
        assert_eq!(budget.amount, 100.0);
        assert_eq!(budget.month, month("2024-01"));
    }

    #[test]
    fn upsert_replaces_amount_for_same_category_and_month() {
        let conn = get_test_connection();
        let first = upsert_budget(
            NewBudget {
                category: Category::Groceries,
                amount: 100.0,
                month: month("2024-01"),
            },
            &conn,
        )
        .unwrap();

        let second = upsert_budget(
            NewBudget {
                category: Category::Groceries,
                amount: 250.0,
                month: month("2024-01"),
            },
            &conn,
        )
        .unwrap();

        // One record, the latter amount.
        assert_eq!(second.id, first.id);
        assert_eq!(second.amount, 250.0);

        let stored = get_budgets(None, &conn).unwrap();
        assert_eq!(stored, vec![second]);
    }

    #[test]
    fn same_category_in_different_months_is_a_separate_budget() {
        let conn = get_test_connection();

        upsert_budget(
            NewBudget {
                category: Category::Groceries,
                amount: 100.0,
                month: month("2024-01"),
            },
            &conn,
        )
        .unwrap();
        upsert_budget(
            NewBudget {
                category: Category::Groceries,
                amount: 120.0,
                month: month("2024-02"),
            },
            &conn,
        )
        .unwrap();

        assert_eq!(get_budgets(None, &conn).unwrap().len(), 2);
    }

    #[test]
    fn get_budgets_filters_by_month() {
        let conn = get_test_connection();
        let january = upsert_budget(
            NewBudget {
                category: Category::Groceries,
                amount: 100.0,
                month: month("2024-01"),
            },
            &conn,
        )
        .unwrap();
        upsert_budget(
            NewBudget {
                category: Category::Travel,
                amount: 500.0,
                month: month("2024-02"),
            },
            &conn,
        )
        .unwrap();

        let got = get_budgets(Some(month("2024-01")), &conn).unwrap();

        assert_eq!(got, vec![january]);
    }

    #[test]
    fn delete_removes_the_budget() {
        let conn = get_test_connection();
        let budget = upsert_budget(
            NewBudget {
                category: Category::Fitness,
                amount: 60.0,
                month: month("2024-01"),
            },
            &conn,
        )
        .unwrap();

        let rows_affected = delete_budget(budget.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_budgets(None, &conn).unwrap(), vec![]);
    }
}
