//! Platform runtime abstraction for alias resolution
//!
//! This module defines the `Runtime` trait that abstracts the filesystem
//! operations the resolver needs: reading manifests and configuration files,
//! and checking whether candidate paths exist. Hosts that serve virtual files
//! implement this trait; everyone else uses [`NativeRuntime`].

pub mod native;

pub use native::NativeRuntime;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Module resolution failed
    #[error("Failed to resolve module '{specifier}' from '{from}': {reason}")]
    ResolutionFailed {
        specifier: String,
        from: PathBuf,
        reason: String,
    },
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a file
    pub is_file: bool,
}

/// Platform runtime trait
///
/// All filesystem access performed by the engine and the built-in resolvers
/// goes through this trait.
///
/// # Example
///
/// ```rust,ignore
/// use fob_paths::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// #[async_trait]
/// impl Runtime for MyRuntime {
///     async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
///         std::fs::read(path).map_err(|e| RuntimeError::Io(e.to_string()))
///     }
///
///     // ... implement other methods
/// }
/// ```
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;

    /// Check if a path exists
    async fn exists(&self, path: &Path) -> bool {
        self.metadata(path).await.is_ok()
    }

    /// Check if a path exists and is a regular file
    async fn is_file(&self, path: &Path) -> bool {
        matches!(self.metadata(path).await, Ok(meta) if meta.is_file)
    }

    /// Check if a path exists and is a directory
    async fn is_dir(&self, path: &Path) -> bool {
        matches!(self.metadata(path).await, Ok(meta) if meta.is_dir)
    }
}
