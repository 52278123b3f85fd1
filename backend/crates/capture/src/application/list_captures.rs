//! Capture Query Use Cases

use std::sync::Arc;

use crate::domain::entities::{CaptureView, OrderSummary};
use crate::domain::repository::CaptureRepository;
use crate::domain::value_objects::OrderNo;
use crate::error::CaptureResult;

/// Captures of one order, newest first
pub struct ListCapturesUseCase<R>
where
    R: CaptureRepository,
{
    capture_repo: Arc<R>,
}

impl<R> ListCapturesUseCase<R>
where
    R: CaptureRepository,
{
    pub fn new(capture_repo: Arc<R>) -> Self {
        Self { capture_repo }
    }

    pub async fn execute(&self, order_no: &str) -> CaptureResult<Vec<CaptureView>> {
        let order_no = OrderNo::parse(order_no)?;
        let captures = self.capture_repo.find_by_order(&order_no).await?;

        tracing::debug!(order_no = %order_no, count = captures.len(), "Listed captures");

        Ok(captures)
    }
}

/// Orders with their capture counts, most recent first
pub struct ListOrdersUseCase<R>
where
    R: CaptureRepository,
{
    capture_repo: Arc<R>,
}

impl<R> ListOrdersUseCase<R>
where
    R: CaptureRepository,
{
    pub fn new(capture_repo: Arc<R>) -> Self {
        Self { capture_repo }
    }

    pub async fn execute(&self) -> CaptureResult<Vec<OrderSummary>> {
        self.capture_repo.summarize_orders().await
    }
}
