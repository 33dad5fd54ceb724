//! Native runtime backed by `tokio::fs`

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Native filesystem runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

#[async_trait]
impl Runtime for NativeRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(format!("Failed to read {}: {}", path.display(), e))
            }
        })
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(format!(
                    "Failed to get metadata for {}: {}",
                    path.display(),
                    e
                ))
            }
        })?;

        Ok(FileMetadata {
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            is_file: metadata.is_file(),
        })
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        std::env::current_dir()
            .map_err(|e| RuntimeError::Io(format!("Failed to get current directory: {}", e)))
    }
}
