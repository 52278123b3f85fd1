//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{CaptureView, OrderSummary};
use crate::domain::services::photo_url;

fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

// ============================================================================
// Captures
// ============================================================================

/// Public projection of a capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub id: String,
    pub photo_url: String,
    pub captured_at: DateTime<Utc>,
    /// Operator display name
    pub operator: Option<String>,
    pub station: Option<String>,
    pub note: String,
    pub responsible: String,
    pub voided: bool,
}

impl CaptureRecord {
    pub fn from_view(view: CaptureView, files_prefix: &str) -> Self {
        Self {
            id: view.id.to_string(),
            photo_url: photo_url(files_prefix, &view.order_no, view.file_name()),
            captured_at: from_millis(view.captured_at_ms),
            operator: view.operator_name,
            station: view.station,
            note: view.note,
            responsible: view.responsible,
            voided: view.voided,
        }
    }
}

/// `GET /captures` query string
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureQuery {
    pub order_no: Option<String>,
}

/// Void request
#[derive(Debug, Clone, Deserialize)]
pub struct VoidRequest {
    pub reason: String,
}

// ============================================================================
// Orders
// ============================================================================

/// One row of the orders listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummaryResponse {
    pub order_no: String,
    pub last_capture_at: DateTime<Utc>,
    pub count: i64,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(summary: OrderSummary) -> Self {
        Self {
            order_no: summary.order_no,
            last_capture_at: from_millis(summary.last_capture_at_ms),
            count: summary.count,
        }
    }
}
