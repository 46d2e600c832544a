//! Pagination shared by log and audit queries

use serde::Serialize;

use crate::utils::{validation::parse_count_param, AppError};

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u32 = 100;

/// Upper bound on any single page
pub const MAX_LIMIT: u32 = 1000;

/// Offset pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Build a window, clamping the limit to [`MAX_LIMIT`]
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    /// Parse raw `limit` / `offset` query values
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, AppError> {
        Ok(Self::new(
            parse_count_param("limit", limit)?,
            parse_count_param("offset", offset)?,
        ))
    }
}

/// One page of results plus the total number of matching rows
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub limit: u32,
    pub offset: u32,
}
