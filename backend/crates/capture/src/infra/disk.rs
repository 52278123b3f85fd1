//! Disk Image Store
//!
//! Files live under a single root; relative paths are `<order_no>/<file>`.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::repository::ImageStore;
use crate::error::{CaptureError, CaptureResult};

/// Local filesystem image store
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    root: PathBuf,
}

impl DiskImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path, refusing anything that escapes the root
    fn resolve(&self, relative_path: &str) -> CaptureResult<PathBuf> {
        let relative = Path::new(relative_path);
        let safe = !relative_path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(CaptureError::Internal(format!(
                "Refusing storage path: {relative_path}"
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl ImageStore for DiskImageStore {
    async fn save(&self, relative_path: &str, bytes: &[u8]) -> CaptureResult<()> {
        let path = self.resolve(relative_path)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Image stored");

        Ok(())
    }
}
