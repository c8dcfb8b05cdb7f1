//! Common functionality for paging list endpoints.

use serde::Deserialize;

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// The `page` and `limit` parameters of a list request's query string.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// The 1-based page number.
    pub page: Option<u64>,
    /// The number of records per page.
    pub limit: Option<u64>,
}

/// The LIMIT/OFFSET pair a [PageQuery] resolves to.
///
/// The fields are `i64` because that is the integer type SQLite binds.
#[derive(Debug, PartialEq, Eq)]
pub struct PageBounds {
    /// The maximum number of records to return.
    pub limit: i64,
    /// The number of records to skip.
    pub offset: i64,
}

impl PageQuery {
    /// Resolve the query parameters against `config`, filling in defaults and
    /// clamping the page size.
    pub fn bounds(&self, config: &PaginationConfig) -> PageBounds {
        let page = self.page.unwrap_or(config.default_page).max(1);
        let limit = self
            .limit
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size);

        // `page` is attacker-controlled, saturate rather than overflow.
        let offset = page
            .saturating_sub(1)
            .saturating_mul(limit)
            .min(i64::MAX as u64);

        PageBounds {
            limit: limit as i64,
            offset: offset as i64,
        }
    }
}
