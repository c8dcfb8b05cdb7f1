//! Budget management for the finance tracker.
//!
//! A budget is a monthly spending ceiling for one category. This module
//! contains the `Budget` and `NewBudget` models, the database functions that
//! enforce the one-budget-per-(category, month) invariant via upsert, and the
//! JSON endpoints for the budget routes.

mod core;
mod delete_budget_endpoint;
mod list_budgets_endpoint;
mod upsert_budget_endpoint;

pub use core::{Budget, NewBudget, create_budget_table, get_budgets};
pub use delete_budget_endpoint::delete_budget_endpoint;
pub use list_budgets_endpoint::list_budgets_endpoint;
pub use upsert_budget_endpoint::upsert_budget_endpoint;

#[cfg(test)]
pub use core::upsert_budget;
