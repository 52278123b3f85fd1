//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CaptureAppState;
pub use router::{capture_router, capture_router_generic};
