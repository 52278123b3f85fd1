//! Repository Traits
//!
//! Interfaces for persistence, file storage and rendering.
//! Implementations are in the infrastructure layer.

use kernel::id::CaptureId;

use crate::domain::entities::{CaptureView, OrderSummary, PackCapture};
use crate::domain::value_objects::OrderNo;
use crate::error::{CaptureResult, RenderError};

/// Capture repository trait
#[trait_variant::make(CaptureRepository: Send)]
pub trait LocalCaptureRepository {
    /// Insert one capture and return it as read back from the store
    async fn create(&self, capture: &PackCapture) -> CaptureResult<CaptureView>;

    /// Captures of one order, newest first
    async fn find_by_order(&self, order_no: &OrderNo) -> CaptureResult<Vec<CaptureView>>;

    /// One row per order, most recent capture first
    async fn summarize_orders(&self) -> CaptureResult<Vec<OrderSummary>>;

    async fn find_by_id(&self, id: &CaptureId) -> CaptureResult<Option<CaptureView>>;

    /// Void a capture that is not voided yet.
    /// Returns `false` when no such row was updated.
    async fn mark_voided(&self, id: &CaptureId, reason: &str) -> CaptureResult<bool>;
}

/// Image file storage
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Write a new file at `relative_path`. Existing files are never
    /// overwritten.
    async fn save(&self, relative_path: &str, bytes: &[u8]) -> CaptureResult<()>;
}

/// Stamps a caption onto an image. CPU-bound; callers run it on the blocking
/// pool.
pub trait WatermarkRenderer: Send + Sync + 'static {
    fn render(&self, original: &[u8], caption: &str) -> Result<Vec<u8>, RenderError>;
}
