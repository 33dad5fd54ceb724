//! External resolution services
//!
//! The engine never performs language-aware module resolution itself. It
//! calls out to two services:
//!
//! - a [`ModuleResolver`] that turns a candidate path into a real file
//!   (extension probing, index files, package manifests);
//! - a [`FallbackResolver`] that handles everything the aliases don't: bare
//!   package specifiers, and candidates that landed inside the package
//!   manager's dependency directory.
//!
//! Both are async so hosts can plug in resolvers that yield (a bundler's own
//! resolve hook, a remote resolver). Synchronous implementations simply
//! return immediately.

use crate::runtime::RuntimeResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Language-aware module resolution for a single candidate path
#[async_trait]
pub trait ModuleResolver: Send + Sync + std::fmt::Debug {
    /// Resolve `candidate` (an absolute path without guarantees about
    /// extensions) to an existing file
    ///
    /// Returns `Ok(None)` when nothing matches.
    async fn resolve_module(
        &self,
        candidate: &Path,
        importer: &Path,
    ) -> RuntimeResult<Option<PathBuf>>;
}

#[async_trait]
impl<T: ModuleResolver + ?Sized> ModuleResolver for Arc<T> {
    async fn resolve_module(
        &self,
        candidate: &Path,
        importer: &Path,
    ) -> RuntimeResult<Option<PathBuf>> {
        (**self).resolve_module(candidate, importer).await
    }
}

/// Generic resolver used when aliasing does not produce a final answer
///
/// The engine is transparent to [`Self::Output`]: whatever the fallback
/// returns is handed back to the caller unchanged.
#[async_trait]
pub trait FallbackResolver: Send + Sync {
    /// Result shape produced by this resolver
    type Output: Send;

    /// Resolve `specifier` as imported from `importer`
    async fn resolve(
        &self,
        specifier: &str,
        importer: &str,
    ) -> RuntimeResult<Option<Self::Output>>;
}

#[async_trait]
impl<T: FallbackResolver + ?Sized> FallbackResolver for Arc<T> {
    type Output = T::Output;

    async fn resolve(
        &self,
        specifier: &str,
        importer: &str,
    ) -> RuntimeResult<Option<Self::Output>> {
        (**self).resolve(specifier, importer).await
    }
}
