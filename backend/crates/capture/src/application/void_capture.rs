//! Void Capture Use Case
//!
//! Marks a capture as void. The row and its files are kept.

use std::sync::Arc;

use kernel::id::CaptureId;

use crate::domain::entities::CaptureView;
use crate::domain::repository::CaptureRepository;
use crate::domain::value_objects::RequiredText;
use crate::error::{CaptureError, CaptureResult};

/// Input DTO for void
#[derive(Debug, Clone)]
pub struct VoidCaptureInput {
    /// Raw path segment; malformed ids are treated as unknown
    pub capture_id: String,
    pub reason: String,
    /// Operator performing the void, for the log
    pub operator_id: String,
}

/// Void Capture Use Case
pub struct VoidCaptureUseCase<R>
where
    R: CaptureRepository,
{
    capture_repo: Arc<R>,
}

impl<R> VoidCaptureUseCase<R>
where
    R: CaptureRepository,
{
    pub fn new(capture_repo: Arc<R>) -> Self {
        Self { capture_repo }
    }

    pub async fn execute(&self, input: VoidCaptureInput) -> CaptureResult<CaptureView> {
        let reason = RequiredText::parse("reason", &input.reason)?;
        let id: CaptureId = input
            .capture_id
            .trim()
            .parse()
            .map_err(|_| CaptureError::NotFound)?;

        let existing = self
            .capture_repo
            .find_by_id(&id)
            .await?
            .ok_or(CaptureError::NotFound)?;
        if existing.voided {
            return Err(CaptureError::AlreadyVoided);
        }

        // Conditional update; a concurrent void loses here
        if !self.capture_repo.mark_voided(&id, reason.as_str()).await? {
            return Err(CaptureError::AlreadyVoided);
        }

        tracing::info!(
            capture_id = %id,
            order_no = %existing.order_no,
            operator_id = %input.operator_id,
            "Capture voided"
        );

        self.capture_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CaptureError::Internal("Voided capture vanished".to_string()))
    }
}
