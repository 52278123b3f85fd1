//! Upload Captures Use Case
//!
//! Stores each uploaded photo, stamps a watermarked copy and records one
//! capture per file.

use std::sync::Arc;

use axum::body::Bytes;
use chrono::{Local, Utc};
use kernel::id::CaptureId;
use platform::crypto::sha256_hex;

use crate::application::config::CaptureConfig;
use crate::domain::entities::{CaptureView, PackCapture};
use crate::domain::repository::{CaptureRepository, ImageStore, WatermarkRenderer};
use crate::domain::services::{original_path, stamped_path, watermark_caption};
use crate::domain::value_objects::{OrderNo, RequiredText};
use crate::error::{CaptureError, CaptureResult, RenderError};

/// Input DTO for upload
#[derive(Debug, Clone, Default)]
pub struct UploadCapturesInput {
    pub order_no: String,
    pub responsible: String,
    pub note: String,
    /// Authenticated uploader
    pub operator_id: Option<String>,
    /// File bodies in upload order
    pub files: Vec<Bytes>,
}

/// Upload Captures Use Case
pub struct UploadCapturesUseCase<R, S, W>
where
    R: CaptureRepository,
    S: ImageStore,
    W: WatermarkRenderer,
{
    capture_repo: Arc<R>,
    store: Arc<S>,
    renderer: Arc<W>,
    config: Arc<CaptureConfig>,
}

impl<R, S, W> UploadCapturesUseCase<R, S, W>
where
    R: CaptureRepository,
    S: ImageStore,
    W: WatermarkRenderer,
{
    pub fn new(
        capture_repo: Arc<R>,
        store: Arc<S>,
        renderer: Arc<W>,
        config: Arc<CaptureConfig>,
    ) -> Self {
        Self {
            capture_repo,
            store,
            renderer,
            config,
        }
    }

    /// Files are processed sequentially and each capture is committed on its
    /// own: a failure on file N leaves files 1..N-1 recorded.
    pub async fn execute(&self, input: UploadCapturesInput) -> CaptureResult<Vec<CaptureView>> {
        let order_no = OrderNo::parse(&input.order_no)?;
        let responsible = RequiredText::parse("responsible", &input.responsible)?;
        let note = RequiredText::parse("note", &input.note)?;

        let files: Vec<Bytes> = input
            .files
            .into_iter()
            .filter(|file| !file.is_empty())
            .collect();
        if files.is_empty() {
            return Err(CaptureError::validation("At least one file is required"));
        }

        let received = files.len();
        let limit = self.config.max_files_per_upload;
        if received > limit {
            tracing::info!(
                order_no = %order_no,
                received,
                limit,
                "Dropping files beyond the per-upload limit"
            );
        }

        let mut created = Vec::with_capacity(received.min(limit));
        for bytes in files.into_iter().take(limit) {
            let view = self
                .store_one(
                    &order_no,
                    responsible.as_str(),
                    note.as_str(),
                    input.operator_id.as_deref(),
                    bytes,
                )
                .await?;
            created.push(view);
        }

        tracing::info!(
            order_no = %order_no,
            operator_id = input.operator_id.as_deref().unwrap_or("N/A"),
            count = created.len(),
            "Captures uploaded"
        );

        Ok(created)
    }

    async fn store_one(
        &self,
        order_no: &OrderNo,
        responsible: &str,
        note: &str,
        operator_id: Option<&str>,
        bytes: Bytes,
    ) -> CaptureResult<CaptureView> {
        let id = CaptureId::new();
        let checksum = sha256_hex(&bytes);

        let orig = original_path(order_no, &id);
        self.store.save(&orig, &bytes).await?;

        let photo_path = if self.config.watermark_enabled {
            let caption = watermark_caption(order_no, &Local::now(), operator_id);
            match self.render(bytes, caption).await {
                Ok(stamped) => {
                    let path = stamped_path(order_no, &id);
                    self.store.save(&path, &stamped).await?;
                    path
                }
                Err(e) => {
                    tracing::warn!(
                        capture_id = %id,
                        error = %e,
                        "Watermark failed, keeping original"
                    );
                    orig
                }
            }
        } else {
            orig
        };

        let capture = PackCapture {
            id,
            order_no: order_no.clone(),
            photo_path,
            captured_at_ms: Utc::now().timestamp_millis(),
            operator_id: operator_id.map(str::to_string),
            station: None,
            note: note.to_string(),
            responsible: responsible.to_string(),
            checksum,
            voided: false,
            void_reason: None,
        };

        self.capture_repo.create(&capture).await
    }

    async fn render(&self, bytes: Bytes, caption: String) -> Result<Vec<u8>, RenderError> {
        let renderer = self.renderer.clone();
        tokio::task::spawn_blocking(move || renderer.render(&bytes, &caption))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }
}
