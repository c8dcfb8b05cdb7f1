//! Defines the endpoint that serves the aggregated reporting views.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    budget::get_budgets,
    month::Month,
    report::{
        aggregation::{
            CategorySpending, MonthlySummary, Totals, category_spending,
            category_spending_in_month, monthly_series, totals,
        },
        comparison::{BudgetComparison, Insight, compare_budgets, spending_insights},
    },
    transaction::get_all_transactions,
};

/// The state needed to build a report.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions and budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for a report request.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// The month the month-scoped views are computed for, as `YYYY-MM`.
    /// Defaults to the current month.
    pub month: Option<Month>,
}

/// Every reporting view for one selected month, derived from the full
/// transaction set.
#[derive(Debug, Serialize)]
pub struct Report {
    /// The month the month-scoped views were computed for.
    pub month: Month,
    /// Overall income, expenses and balance.
    pub totals: Totals,
    /// Income/expense/net per calendar month, in chronological order.
    pub monthly_series: Vec<MonthlySummary>,
    /// All-time spending per category.
    pub category_spending: Vec<CategorySpending>,
    /// Spending per category within the selected month.
    pub month_category_spending: Vec<CategorySpending>,
    /// Budget-vs-actual per category for the selected month.
    pub budget_comparison: Vec<BudgetComparison>,
    /// Over-budget and near-limit observations for the selected month.
    pub insights: Vec<Insight>,
}

/// A route handler that computes all reporting views in one response.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn report_endpoint(
    State(state): State<ReportState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Report>, Error> {
    let month = params.month.unwrap_or_else(Month::current);

    let connection = state.db_connection.lock().unwrap();
    let transactions = get_all_transactions(&connection)?;
    let budgets = get_budgets(Some(month), &connection)?;
    drop(connection);

    let budget_comparison = compare_budgets(&transactions, &budgets, month);
    let insights = spending_insights(&budget_comparison);

    Ok(Json(Report {
        month,
        totals: totals(&transactions),
        monthly_series: monthly_series(&transactions),
        category_spending: category_spending(&transactions),
        month_category_spending: category_spending_in_month(&transactions, month),
        budget_comparison,
        insights,
    }))
}
