//! Input validation utilities
//!
//! Query strings arrive as raw text so that malformed values surface as
//! structured validation errors rather than extractor rejections.

use std::num::IntErrorKind;

use chrono::{DateTime, Utc};

use super::{time::parse_timestamp, AppError};

/// Treat missing and blank strings alike
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Take a required field, recording its name when absent
pub fn require<T>(name: &str, value: Option<T>, missing: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        missing.push(name.to_string());
    }
    value
}

/// Parse an optional ISO-8601 timestamp parameter
pub fn parse_time_param(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_timestamp(raw).map(Some).ok_or_else(|| {
            AppError::validation(format!("{} is not a valid ISO-8601 datetime: {}", name, raw))
        }),
    }
}

/// Parse an optional non-negative integer parameter
///
/// Integers too large for `u32` saturate to `u32::MAX`; callers clamp.
pub fn parse_count_param(name: &str, value: Option<&str>) -> Result<Option<u32>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => match raw.parse::<u32>() {
            Ok(n) => Ok(Some(n)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Some(u32::MAX)),
            Err(_) => Err(AppError::validation(format!(
                "{} must be a non-negative integer: {}",
                name, raw
            ))),
        },
    }
}

/// Parse an optional integer identifier parameter
pub fn parse_id_param(name: &str, value: Option<&str>) -> Result<Option<i64>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("{} must be an integer: {}", name, raw))),
    }
}
