//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and domain services.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{CaptureView, OrderSummary, PackCapture};
pub use repository::{CaptureRepository, ImageStore, WatermarkRenderer};
pub use value_objects::{OrderNo, RequiredText};
