//! Candidate resolution
//!
//! Expands a matched pattern's targets into concrete paths and runs each one
//! through the staged resolution procedure, in declared order:
//!
//! ```text
//! target ─ substitute capture ─ join base dir ─┬─ under node_modules? ─> ResolvedFile (package-rooted)
//!                                               ├─ module resolver hit? ─> ResolvedFile
//!                                               ├─ plain file exists?   ─> ResolvedFile
//!                                               └─ next target
//! ```
//!
//! The first success wins. Candidates are never scored or ranked beyond
//! declaration order.

use crate::matcher::MatchResult;
use crate::runtime::Runtime;
use crate::services::ModuleResolver;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Outcome of resolving one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A concrete file (or package-rooted candidate) was found
    ResolvedFile {
        /// Absolute path of the resolved file or candidate
        path: PathBuf,
        /// The path lives in the package manager's dependency directory and
        /// must be finished by the fallback resolver
        is_package_rooted: bool,
    },
    /// Hand this specifier to the fallback resolver
    DelegateToFallback(String),
    /// No target produced a result
    NoMatch,
}

/// Runs matched targets through module resolution and file checks
#[derive(Debug, Clone)]
pub struct CandidateResolver {
    base_directory: PathBuf,
    package_dir: String,
    module_resolver: Arc<dyn ModuleResolver>,
    runtime: Arc<dyn Runtime>,
}

impl CandidateResolver {
    pub fn new(
        base_directory: impl Into<PathBuf>,
        package_dir: impl Into<String>,
        module_resolver: Arc<dyn ModuleResolver>,
        runtime: Arc<dyn Runtime>,
    ) -> Self {
        Self {
            base_directory: base_directory.into(),
            package_dir: package_dir.into(),
            module_resolver,
            runtime,
        }
    }

    /// Directory alias targets are resolved against
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Resolve a matched request issued from `importer`
    ///
    /// Returns [`Resolution::ResolvedFile`] or [`Resolution::NoMatch`].
    pub async fn resolve(&self, matched: &MatchResult<'_, '_>, importer: &Path) -> Resolution {
        for target in matched.matcher.targets() {
            let candidate = self.candidate_path(&matched.matcher.expand(target, matched.capture));

            if self.is_package_rooted(&candidate) {
                return Resolution::ResolvedFile {
                    path: candidate,
                    is_package_rooted: true,
                };
            }

            match self.module_resolver.resolve_module(&candidate, importer).await {
                Ok(Some(path)) => {
                    return Resolution::ResolvedFile {
                        path,
                        is_package_rooted: false,
                    };
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(
                        "[fob-paths] Module resolver rejected {}: {}",
                        candidate.display(),
                        e
                    );
                }
            }

            // Non-module assets (styles, fonts) that the module resolver ignores
            if self.runtime.is_file(&candidate).await {
                return Resolution::ResolvedFile {
                    path: candidate,
                    is_package_rooted: false,
                };
            }

            debug!(
                "[fob-paths] No file for target '{}' ({})",
                target,
                candidate.display()
            );
        }

        Resolution::NoMatch
    }

    fn candidate_path(&self, expanded: &str) -> PathBuf {
        path_clean::clean(self.base_directory.join(expanded))
    }

    fn is_package_rooted(&self, candidate: &Path) -> bool {
        candidate
            .components()
            .any(|component| component.as_os_str() == OsStr::new(&self.package_dir))
    }
}
