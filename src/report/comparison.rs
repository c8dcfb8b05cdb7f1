//! Budget-vs-actual comparison and spending insights.

use std::{collections::HashMap, sync::OnceLock};

use numfmt::{Formatter, Precision};
use serde::Serialize;

use crate::{
    budget::Budget,
    category::{ALL_CATEGORIES, Category},
    month::Month,
    transaction::Transaction,
};

/// How far a category's actual spending is from its budget in one month.
#[derive(Debug, PartialEq, Serialize)]
pub struct BudgetComparison {
    /// The category being compared.
    pub category: Category,
    /// The budgeted amount for the month, zero when no budget is set.
    pub budget: f64,
    /// The actual spend in the month.
    pub actual: f64,
    /// `budget - actual`; negative when the budget was exceeded.
    pub remaining: f64,
    /// The category's display color.
    pub color: &'static str,
}

/// Compare each category's budget against its actual spending within `month`.
///
/// Categories with neither a budget nor any spending are excluded. The
/// result is sorted descending by actual spend.
pub fn compare_budgets(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: Month,
) -> Vec<BudgetComparison> {
    let mut actuals: HashMap<Category, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.amount < 0.0 && month.contains(transaction.date))
    {
        *actuals.entry(transaction.category).or_insert(0.0) += transaction.amount.abs();
    }

    let mut comparisons: Vec<BudgetComparison> = ALL_CATEGORIES
        .into_iter()
        .map(|category| {
            let budget = budgets
                .iter()
                .find(|budget| budget.category == category && budget.month == month)
                .map(|budget| budget.amount)
                .unwrap_or(0.0);
            let actual = actuals.get(&category).copied().unwrap_or(0.0);

            BudgetComparison {
                category,
                budget,
                actual,
                remaining: budget - actual,
                color: category.color(),
            }
        })
        .filter(|comparison| comparison.budget > 0.0 || comparison.actual > 0.0)
        .collect();

    comparisons.sort_by(|a, b| b.actual.total_cmp(&a.actual));

    comparisons
}

/// The fraction of a budget that has to be spent before a near-limit insight
/// is emitted.
const NEAR_LIMIT_RATIO: f64 = 0.8;

/// A human-readable observation about one category's spending.
#[derive(Debug, PartialEq, Serialize)]
pub struct Insight {
    /// The category the insight is about.
    pub category: Category,
    /// The message to show the user.
    pub message: String,
}

/// Generate insights for categories that are over or near their budget.
///
/// Categories without a budget never produce an insight, no matter how much
/// was spent.
pub fn spending_insights(comparisons: &[BudgetComparison]) -> Vec<Insight> {
    comparisons
        .iter()
        .filter(|comparison| comparison.budget > 0.0)
        .filter_map(|comparison| {
            let message = if comparison.actual > comparison.budget {
                format!(
                    "You've exceeded your {} budget by {}",
                    comparison.category,
                    format_currency(comparison.actual - comparison.budget)
                )
            } else if comparison.actual > comparison.budget * NEAR_LIMIT_RATIO {
                format!(
                    "You're close to your {} budget ({:.1}% used)",
                    comparison.category,
                    comparison.actual / comparison.budget * 100.0
                )
            } else {
                return None;
            };

            Some(Insight {
                category: comparison.category,
                message,
            })
        })
        .collect()
}

fn format_currency(amount: f64) -> String {
    static CURRENCY_FMT: OnceLock<Formatter> = OnceLock::new();

    let currency_fmt = CURRENCY_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    }

    let mut formatted_string = currency_fmt.fmt_string(amount);

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}
