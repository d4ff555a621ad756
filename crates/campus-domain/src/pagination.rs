//! Pagination types.

use serde::{Deserialize, Serialize};

/// Upper bound on `limit`; larger requests are clamped, not rejected.
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters shared across all search endpoints.
///
/// - `page`: ≥ 1, default 1
/// - `limit`: 1–100, default 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Rejected pagination input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("page must be a positive integer")]
    InvalidPage,
    #[error("limit must be a positive integer")]
    InvalidLimit,
}

impl PageRequest {
    /// Parse raw query-string values. Missing values fall back to the defaults;
    /// zero, negative or non-numeric values are rejected.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        let page = match page.map(str::trim) {
            None | Some("") => default_page(),
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|p| *p >= 1)
                .ok_or(PaginationError::InvalidPage)?,
        };
        let limit = match limit.map(str::trim) {
            None | Some("") => default_limit(),
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|l| *l >= 1)
                .ok_or(PaginationError::InvalidLimit)?
                .min(MAX_LIMIT),
        };
        Ok(Self { page, limit })
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}
