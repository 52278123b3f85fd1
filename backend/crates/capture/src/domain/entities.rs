//! Domain Entities
//!
//! Pack captures and their read models.

use kernel::id::CaptureId;

use crate::domain::value_objects::OrderNo;

/// A photo proving an order was packed, as written to the store
#[derive(Debug, Clone)]
pub struct PackCapture {
    pub id: CaptureId,
    pub order_no: OrderNo,
    /// Path relative to the storage root (`<order_no>/<file>`)
    pub photo_path: String,
    /// Unix milliseconds (UTC)
    pub captured_at_ms: i64,
    /// Uploader. Stored as NULL when no operator row matches.
    pub operator_id: Option<String>,
    pub station: Option<String>,
    pub note: String,
    pub responsible: String,
    /// SHA-256 hex of the bytes as uploaded
    pub checksum: String,
    pub voided: bool,
    pub void_reason: Option<String>,
}

/// Capture joined with its operator's display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureView {
    pub id: CaptureId,
    pub order_no: String,
    pub photo_path: String,
    pub captured_at_ms: i64,
    pub operator_name: Option<String>,
    pub station: Option<String>,
    pub note: String,
    pub responsible: String,
    pub checksum: String,
    pub voided: bool,
    pub void_reason: Option<String>,
}

impl CaptureView {
    /// File name part of `photo_path`
    pub fn file_name(&self) -> &str {
        self.photo_path
            .rsplit('/')
            .next()
            .unwrap_or(self.photo_path.as_str())
    }
}

/// Per-order aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_no: String,
    pub last_capture_at_ms: i64,
    pub count: i64,
}
