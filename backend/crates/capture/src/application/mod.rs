//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod list_captures;
pub mod upload_captures;
pub mod void_capture;

// Re-exports
pub use config::CaptureConfig;
pub use list_captures::{ListCapturesUseCase, ListOrdersUseCase};
pub use upload_captures::{UploadCapturesInput, UploadCapturesUseCase};
pub use void_capture::{VoidCaptureInput, VoidCaptureUseCase};
