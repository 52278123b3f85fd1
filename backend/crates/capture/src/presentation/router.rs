//! Capture Router

use auth::{BearerAuthState, TokenService, require_bearer};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::CaptureConfig;
use crate::domain::repository::{CaptureRepository, ImageStore, WatermarkRenderer};
use crate::infra::{DiskImageStore, SqliteCaptureRepository, TextWatermarkRenderer};
use crate::presentation::handlers::{self, CaptureAppState};

/// Create the Capture router with SQLite, disk storage and the text renderer
pub fn capture_router(
    captures: SqliteCaptureRepository,
    store: DiskImageStore,
    renderer: TextWatermarkRenderer,
    config: CaptureConfig,
    tokens: Arc<TokenService>,
) -> Router {
    capture_router_generic(captures, store, renderer, config, tokens)
}

/// Create a generic Capture router for any implementation
///
/// Every route requires a bearer token except `OPTIONS /captures`.
pub fn capture_router_generic<R, S, W>(
    captures: R,
    store: S,
    renderer: W,
    config: CaptureConfig,
    tokens: Arc<TokenService>,
) -> Router
where
    R: CaptureRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    W: WatermarkRenderer,
{
    let body_limit = config.max_upload_bytes;
    let state = CaptureAppState {
        captures: Arc::new(captures),
        store: Arc::new(store),
        renderer: Arc::new(renderer),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/captures",
            get(handlers::list_captures::<R, S, W>)
                .post(handlers::upload_captures::<R, S, W>)
                .options(handlers::preflight),
        )
        .route("/captures/{id}/void", post(handlers::void_capture::<R, S, W>))
        .route("/orders", get(handlers::list_orders::<R, S, W>))
        .route_layer(middleware::from_fn_with_state(
            BearerAuthState::new(tokens),
            require_bearer,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
