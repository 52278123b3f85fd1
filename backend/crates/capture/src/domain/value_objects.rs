//! Domain Value Objects
//!
//! Validated input values for the capture domain.

use std::fmt;

use crate::error::{CaptureError, CaptureResult};

/// Order number. Trimmed, non-empty, and safe to use as a single directory
/// name under the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNo(String);

impl OrderNo {
    pub fn parse(raw: &str) -> CaptureResult<Self> {
        let value = raw.trim();

        if value.is_empty() {
            return Err(CaptureError::validation("order_no is required"));
        }
        if value == "." || value == ".." {
            return Err(CaptureError::validation("order_no is not a valid name"));
        }
        if value
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(CaptureError::validation(
                "order_no must not contain path separators or control characters",
            ));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text form field that must not be blank. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn parse(field: &'static str, raw: &str) -> CaptureResult<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(CaptureError::Validation(format!("{field} is required")));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
