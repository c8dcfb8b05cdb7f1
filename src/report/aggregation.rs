//! Transaction data aggregation for the reporting views.
//!
//! Provides functions to group transactions by calendar month, total
//! spending by category, and compute the overall income/expense/balance
//! figures. All functions operate over the full in-memory transaction set.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    category::{ALL_CATEGORIES, Category},
    month::Month,
    transaction::Transaction,
};

/// Income, expense and net totals for one calendar month.
#[derive(Debug, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The month's human-readable label, e.g. "January 2024".
    pub month: String,
    /// The sum of positive amounts in the month.
    pub income: f64,
    /// The sum of the absolute values of negative amounts in the month.
    pub expenses: f64,
    /// The sum of all amounts in the month.
    pub net: f64,
}

/// Group transactions by calendar month and total each month's income,
/// expenses and net.
///
/// The output is ordered chronologically by the underlying month, not by its
/// label string.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut totals: HashMap<Month, MonthTotals> = HashMap::new();

    for transaction in transactions {
        let entry = totals
            .entry(Month::from_date(transaction.date))
            .or_default();

        if transaction.amount > 0.0 {
            entry.income += transaction.amount;
        } else {
            entry.expenses += transaction.amount.abs();
        }
        entry.net += transaction.amount;
    }

    let mut months: Vec<Month> = totals.keys().copied().collect();
    months.sort();

    months
        .into_iter()
        .map(|month| {
            let MonthTotals {
                income,
                expenses,
                net,
            } = totals[&month];

            MonthlySummary {
                month: month.label(),
                income,
                expenses,
                net,
            }
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
struct MonthTotals {
    income: f64,
    expenses: f64,
    net: f64,
}

/// The total spent in one category, with its display color.
#[derive(Debug, PartialEq, Serialize)]
pub struct CategorySpending {
    /// The category the spending belongs to.
    pub category: Category,
    /// The sum of the absolute values of the category's negative amounts.
    pub amount: f64,
    /// The category's display color.
    pub color: &'static str,
}

/// Total all-time spending per category.
///
/// Only expenses (negative amounts) count towards spending. Categories with
/// zero spend are dropped and the result is sorted descending by amount.
pub fn category_spending(transactions: &[Transaction]) -> Vec<CategorySpending> {
    spending_per_category(transactions.iter())
}

/// Total spending per category for transactions dated within `month`.
pub fn category_spending_in_month(
    transactions: &[Transaction],
    month: Month,
) -> Vec<CategorySpending> {
    spending_per_category(
        transactions
            .iter()
            .filter(|transaction| month.contains(transaction.date)),
    )
}

fn spending_per_category<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> Vec<CategorySpending> {
    // Start every category at zero so spending only ever lands on one of the
    // 17 known labels.
    let mut totals: HashMap<Category, f64> =
        ALL_CATEGORIES.into_iter().map(|label| (label, 0.0)).collect();

    for transaction in transactions.filter(|transaction| transaction.amount < 0.0) {
        *totals.get_mut(&transaction.category).unwrap() += transaction.amount.abs();
    }

    let mut spending: Vec<CategorySpending> = ALL_CATEGORIES
        .into_iter()
        .map(|category| CategorySpending {
            category,
            amount: totals[&category],
            color: category.color(),
        })
        .filter(|entry| entry.amount > 0.0)
        .collect();

    spending.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    spending
}

/// The overall income, expense and balance figures.
#[derive(Debug, PartialEq, Serialize)]
pub struct Totals {
    /// The sum of all positive amounts.
    pub income: f64,
    /// The sum of the absolute values of all negative amounts.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
}

/// Compute the overall totals for a set of transactions.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let income: f64 = transactions
        .iter()
        .filter(|transaction| transaction.amount > 0.0)
        .map(|transaction| transaction.amount)
        .sum();
    let expenses: f64 = transactions
        .iter()
        .filter(|transaction| transaction.amount < 0.0)
        .map(|transaction| transaction.amount.abs())
        .sum();

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}
