//! Infrastructure Layer
//!
//! SQLite repository, disk image store and the watermark renderer.

pub mod disk;
pub mod sqlite;
pub mod watermark;

pub use disk::DiskImageStore;
pub use sqlite::SqliteCaptureRepository;
pub use watermark::{TextWatermarkRenderer, discover_font};
