//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, category::Category, pagination::PageBounds};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Positive amounts are income, negative amounts are expenses. Transactions
/// are immutable once created except for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: i64,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The data needed to create a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category the transaction belongs to.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// The creation timestamp is set to the current UTC time.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, description, category, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, description, category, date, created_at",
        )?
        .query_row(
            (
                new_transaction.amount,
                new_transaction.description,
                new_transaction.category,
                new_transaction.date,
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get one page of transactions, sorted by date and then creation time, most
/// recent first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transaction_page(
    bounds: &PageBounds,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    // Sort by id last to keep the page order stable when timestamps collide.
    connection
        .prepare(
            "SELECT id, amount, description, category, date, created_at FROM \"transaction\"
             ORDER BY date DESC, created_at DESC, id DESC
             LIMIT ?1 OFFSET ?2",
        )?
        .query_map((bounds.limit, bounds.offset), map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

/// Get every transaction in the database.
///
/// The reporting views aggregate over the full transaction set, so no
/// ordering is applied here.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare("SELECT id, amount, description, category, date, created_at FROM \"transaction\"")?
        .query_map([], map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

/// Delete the transaction with `id` from the database.
///
/// Returns the number of rows deleted, which is zero when `id` does not refer
/// to a transaction.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(id: i64, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    // Composite index used by the paged listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_created_at
         ON \"transaction\"(date DESC, created_at DESC)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
        created_at: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        category::Category,
        db::initialize,
        pagination::PageBounds,
        transaction::{
            NewTransaction,
            core::{
                create_transaction, delete_transaction, get_all_transactions, get_transaction_page,
            },
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_transaction(amount: f64, category: Category, date: time::Date) -> NewTransaction {
        NewTransaction {
            amount,
            description: "test transaction".to_owned(),
            category,
            date,
        }
    }

    #[test]
    fn create_succeeds_and_round_trips() {
        let conn = get_test_connection();
        let amount = -12.3;

        let created = create_transaction(
            new_transaction(amount, Category::Groceries, date!(2024 - 01 - 05)),
            &conn,
        )
        .expect("Could not create transaction");

        assert!(created.id > 0);
        assert_eq!(created.amount, amount);
        assert_eq!(created.category, Category::Groceries);
        assert_eq!(created.date, date!(2024 - 01 - 05));

        let all = get_all_transactions(&conn).expect("Could not get transactions");
        assert_eq!(all, vec![created]);
    }

    #[test]
    fn page_is_sorted_by_date_descending() {
        let conn = get_test_connection();
        let dates = [
            date!(2024 - 01 - 05),
            date!(2024 - 03 - 01),
            date!(2024 - 02 - 14),
        ];
        for date in dates {
            create_transaction(new_transaction(-1.0, Category::Other, date), &conn)
                .expect("Could not create transaction");
        }

        let page = get_transaction_page(
            &PageBounds {
                limit: 10,
                offset: 0,
            },
            &conn,
        )
        .expect("Could not get transaction page");

        let got_dates: Vec<time::Date> = page.iter().map(|transaction| transaction.date).collect();
        assert_eq!(
            got_dates,
            [
                date!(2024 - 03 - 01),
                date!(2024 - 02 - 14),
                date!(2024 - 01 - 05)
            ]
        );
    }

    #[test]
    fn page_respects_limit_and_offset() {
        let conn = get_test_connection();
        for day in 1..=9 {
            create_transaction(
                new_transaction(
                    day as f64,
                    Category::Other,
                    date!(2024 - 01 - 01).replace_day(day).unwrap(),
                ),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let page = get_transaction_page(&PageBounds { limit: 4, offset: 4 }, &conn)
            .expect("Could not get transaction page");

        // Dates run 9..1 descending, so the second page of 4 is days 5..2.
        let got_amounts: Vec<f64> = page.iter().map(|transaction| transaction.amount).collect();
        assert_eq!(got_amounts, [5.0, 4.0, 3.0, 2.0]);
    }

    #[test]
    fn refetching_a_page_returns_the_same_slice() {
        let conn = get_test_connection();
        for day in 1..=6 {
            create_transaction(
                new_transaction(
                    day as f64,
                    Category::Other,
                    date!(2024 - 01 - 01).replace_day(day).unwrap(),
                ),
                &conn,
            )
            .expect("Could not create transaction");
        }
        let bounds = PageBounds {
            limit: 3,
            offset: 3,
        };

        let first_fetch = get_transaction_page(&bounds, &conn).unwrap();
        let second_fetch = get_transaction_page(&bounds, &conn).unwrap();

        assert_eq!(first_fetch, second_fetch);
    }

    #[test]
    fn delete_removes_the_transaction() {
        let conn = get_test_connection();
        let transaction = create_transaction(
            new_transaction(-50.0, Category::Groceries, date!(2024 - 01 - 05)),
            &conn,
        )
        .unwrap();

        let rows_affected = delete_transaction(transaction.id, &conn).unwrap();

        assert_eq!(rows_affected, 1);
        assert_eq!(get_all_transactions(&conn).unwrap(), vec![]);
    }

    #[test]
    fn delete_missing_transaction_affects_no_rows() {
        let conn = get_test_connection();

        let rows_affected = delete_transaction(999, &conn).unwrap();

        assert_eq!(rows_affected, 0);
    }
}
