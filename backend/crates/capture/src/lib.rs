//! Capture (Pack Capture) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Captures, order numbers, repository traits, captions
//! - `application/` - Upload, query and void use cases
//! - `infra/` - SQLite repository, disk store, watermark renderer
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Upload pipeline
//! - The original upload is always kept as `<order_no>/<id>_orig.jpg`
//! - A watermarked copy `<order_no>/<id>.jpg` is added when rendering works;
//!   render failures fall back to the original and never fail the upload
//! - Each file is committed on its own, in upload order

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CaptureConfig;
pub use error::{CaptureError, CaptureResult, RenderError};
pub use infra::{DiskImageStore, SqliteCaptureRepository, TextWatermarkRenderer, discover_font};
pub use presentation::router::{capture_router, capture_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};
