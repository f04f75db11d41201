//! File output for export documents.
//!
//! Documents reach the writer already rendered, so the writer only deals
//! with paths and bytes.

use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::Result;
use crate::error::ExportError;

/// Local persistence target for export documents.
#[async_trait]
pub trait SchemaWriter: Send + Sync {
    /// Creates `path` and any missing parents. No-op if it already exists.
    async fn ensure_directory(&self, path: &Path) -> Result<()>;

    /// Writes `contents` to `path`, replacing any existing file.
    async fn write_json(&self, path: &Path, contents: &str) -> Result<()>;

    /// Writes `contents` to `path` only if nothing exists there yet.
    ///
    /// Returns `true` if the file was written.
    async fn write_if_absent(&self, path: &Path, contents: &str) -> Result<bool>;
}

/// Writer backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

#[async_trait]
impl SchemaWriter for FsWriter {
    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| ExportError::io("create directory", path, e))
    }

    async fn write_json(&self, path: &Path, contents: &str) -> Result<()> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| ExportError::io("write", path, e))?;
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }

    async fn write_if_absent(&self, path: &Path, contents: &str) -> Result<bool> {
        // create_new makes the existence check and the create one operation
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!("{} already exists, leaving it untouched", path.display());
                return Ok(false);
            }
            Err(e) => return Err(ExportError::io("create", path, e)),
        };

        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| ExportError::io("write", path, e))?;
        file.flush()
            .await
            .map_err(|e| ExportError::io("flush", path, e))?;

        Ok(true)
    }
}
