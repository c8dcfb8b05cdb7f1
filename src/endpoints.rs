//! The API endpoint URIs.

/// The route to list, create, and delete transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to list, upsert, and delete budgets.
pub const BUDGETS: &str = "/api/budgets";
/// The route serving the aggregated reporting views.
pub const REPORTS: &str = "/api/reports";
/// The liveness probe.
pub const HEALTH: &str = "/api/health";
