//! Reporting views for the finance tracker.
//!
//! Derives, from the full transaction set plus the selected month's budgets,
//! the monthly income/expense/net series, category spending totals (all-time
//! and month-scoped), budget-vs-actual comparisons, and spending insights.
//! All views are served together by the report endpoint.

mod aggregation;
mod comparison;
mod report_endpoint;

pub use report_endpoint::report_endpoint;
