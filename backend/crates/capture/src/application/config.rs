//! Application Configuration
//!
//! Configuration for the Capture application layer.

use std::path::PathBuf;

/// Capture application configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Root directory for stored images
    pub storage_dir: PathBuf,
    /// Stamp uploads with a caption band
    pub watermark_enabled: bool,
    /// Files beyond this count in one upload are dropped
    pub max_files_per_upload: usize,
    /// Path the storage root is served under
    pub files_url_prefix: String,
    /// Request body limit for capture routes
    pub max_upload_bytes: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./data/images"),
            watermark_enabled: true,
            max_files_per_upload: 10,
            files_url_prefix: "/files".to_string(),
            max_upload_bytes: 50 * 1024 * 1024, // 50 MiB
        }
    }
}

impl CaptureConfig {
    /// Config rooted at `storage_dir`, other values default
    pub fn with_storage_dir(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Default::default()
        }
    }
}
