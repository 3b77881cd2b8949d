//! Range (pagination) types for list endpoints.
//!
//! Clients address a page as an inclusive, zero-based `[start, end]` pair.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::result::AppResult;

/// An inclusive, zero-based row range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    /// First row offset (inclusive).
    pub start: u64,
    /// Last row offset (inclusive).
    pub end: u64,
}

impl RangeSpec {
    /// Largest bound accepted. `LIMIT` and `OFFSET` are signed 64-bit in
    /// Postgres.
    pub const MAX_BOUND: u64 = i64::MAX as u64;

    /// Create a range. Fails when `end < start` or either bound exceeds
    /// [`Self::MAX_BOUND`].
    pub fn new(start: u64, end: u64) -> AppResult<Self> {
        if end > Self::MAX_BOUND {
            return Err(AppError::validation(format!(
                "Range end ({end}) must not exceed {}",
                Self::MAX_BOUND
            )));
        }
        if end < start {
            return Err(AppError::validation(format!(
                "Range end ({end}) must not be before start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a JSON-encoded `[start, end]` pair.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| AppError::validation(format!("Malformed range JSON: {e}")))?;

        match value.as_array().map(Vec::as_slice) {
            Some([start, end]) => match (start.as_u64(), end.as_u64()) {
                (Some(start), Some(end)) => Self::new(start, end),
                _ => Err(AppError::validation(
                    "Range bounds must be non-negative integers",
                )),
            },
            _ => Err(AppError::validation(
                "Range must be a two-element array: [start, end]",
            )),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.start
    }

    /// Return the SQL `LIMIT` value (`end - start + 1`).
    pub fn limit(&self) -> u64 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// The inclusive end actually served when only `returned` rows came back.
    ///
    /// Returns `None` for an empty page.
    pub fn served_end(&self, returned: usize) -> Option<u64> {
        if returned == 0 {
            None
        } else {
            Some(self.start + returned as u64 - 1)
        }
    }
}
