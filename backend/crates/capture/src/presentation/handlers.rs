//! HTTP Handlers

use auth::{CurrentOperator, OperatorRole};
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::CaptureConfig;
use crate::application::{
    ListCapturesUseCase, ListOrdersUseCase, UploadCapturesInput, UploadCapturesUseCase,
    VoidCaptureInput, VoidCaptureUseCase,
};
use crate::domain::repository::{CaptureRepository, ImageStore, WatermarkRenderer};
use crate::error::{CaptureError, CaptureResult};
use crate::presentation::dto::{CaptureQuery, CaptureRecord, OrderSummaryResponse, VoidRequest};

/// Roles allowed to upload
pub const UPLOAD_ROLES: &[OperatorRole] = &[OperatorRole::Admin, OperatorRole::Bodega];
/// Roles allowed to read captures and orders
pub const READ_ROLES: &[OperatorRole] = &[OperatorRole::Admin, OperatorRole::CallCenter];
/// Roles allowed to void
pub const VOID_ROLES: &[OperatorRole] = &[OperatorRole::Admin];

/// Multipart field carrying file bodies
const FILES_FIELD: &str = "files";

/// Shared state for capture handlers
pub struct CaptureAppState<R, S, W>
where
    R: CaptureRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    W: WatermarkRenderer,
{
    pub captures: Arc<R>,
    pub store: Arc<S>,
    pub renderer: Arc<W>,
    pub config: Arc<CaptureConfig>,
}

impl<R, S, W> Clone for CaptureAppState<R, S, W>
where
    R: CaptureRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    W: WatermarkRenderer,
{
    fn clone(&self) -> Self {
        Self {
            captures: self.captures.clone(),
            store: self.store.clone(),
            renderer: self.renderer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Captures
// ============================================================================

/// OPTIONS /api/captures
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// POST /api/captures
///
/// The body is only inspected once the role check has passed.
pub async fn upload_captures<R, S, W>(
    State(state): State<CaptureAppState<R, S, W>>,
    operator: CurrentOperator,
    multipart: Result<Multipart, MultipartRejection>,
) -> CaptureResult<Json<Vec<CaptureRecord>>>
where
    R: CaptureRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    W: WatermarkRenderer,
{
    let profile = operator.require_any(UPLOAD_ROLES)?;
    let mut multipart = multipart?;

    let mut input = UploadCapturesInput {
        operator_id: Some(profile.id.to_string()),
        ..Default::default()
    };

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "order_no" => input.order_no = field.text().await?,
            "responsible" => input.responsible = field.text().await?,
            "note" => input.note = field.text().await?,
            FILES_FIELD => {
                let bytes = field.bytes().await?;
                // Empty parts are what browsers send for an untouched file input
                if !bytes.is_empty() {
                    input.files.push(bytes);
                }
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let use_case = UploadCapturesUseCase::new(
        state.captures.clone(),
        state.store.clone(),
        state.renderer.clone(),
        state.config.clone(),
    );

    let created = use_case.execute(input).await?;
    let prefix = &state.config.files_url_prefix;

    Ok(Json(
        created
            .into_iter()
            .map(|view| CaptureRecord::from_view(view, prefix))
            .collect(),
    ))
}

/// GET /api/captures?order_no=...
pub async fn list_captures<R, S, W>(
    State(state): State<CaptureAppState<R, S, W>>,
    operator: CurrentOperator,
    Query(query): Query<CaptureQuery>,
) -> CaptureResult<Json<Vec<CaptureRecord>>>
where
    R: CaptureRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    W: WatermarkRenderer,
{
    operator.require_any(READ_ROLES)?;

    let order_no = query
        .order_no
        .ok_or_else(|| CaptureError::validation("order_no is required"))?;

    let use_case = ListCapturesUseCase::new(state.captures.clone());
    let captures = use_case.execute(&order_no).await?;
    let prefix = &state.config.files_url_prefix;

    Ok(Json(
        captures
            .into_iter()
            .map(|view| CaptureRecord::from_view(view, prefix))
            .collect(),
    ))
}

/// POST /api/captures/{id}/void
pub async fn void_capture<R, S, W>(
    State(state): State<CaptureAppState<R, S, W>>,
    operator: CurrentOperator,
    Path(capture_id): Path<String>,
    Json(req): Json<VoidRequest>,
) -> CaptureResult<Json<CaptureRecord>>
where
    R: CaptureRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    W: WatermarkRenderer,
{
    let profile = operator.require_any(VOID_ROLES)?;

    let use_case = VoidCaptureUseCase::new(state.captures.clone());
    let view = use_case
        .execute(VoidCaptureInput {
            capture_id,
            reason: req.reason,
            operator_id: profile.id.to_string(),
        })
        .await?;

    Ok(Json(CaptureRecord::from_view(
        view,
        &state.config.files_url_prefix,
    )))
}

// ============================================================================
// Orders
// ============================================================================

/// GET /api/orders
pub async fn list_orders<R, S, W>(
    State(state): State<CaptureAppState<R, S, W>>,
    operator: CurrentOperator,
) -> CaptureResult<Json<Vec<OrderSummaryResponse>>>
where
    R: CaptureRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    W: WatermarkRenderer,
{
    operator.require_any(READ_ROLES)?;

    let use_case = ListOrdersUseCase::new(state.captures.clone());
    let orders = use_case.execute().await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
