//! Resolution engine
//!
//! Composition root for alias resolution. The engine owns the compiled
//! matcher list for its whole lifetime and shares it read-only across
//! concurrent `resolve` calls; every call re-runs matching and external
//! resolution (no caching).
//!
//! ## Decision order
//!
//! 1. Decline when there is no importer (entry points), when the specifier
//!    carries the host's virtual-module prefix, or when no matchers compiled.
//! 2. No matching alias: delegate the original specifier to the fallback.
//! 3. A target resolved inside the project: return that path directly.
//! 4. A target landed in the package manager's dependency directory: delegate
//!    the computed candidate path to the fallback.
//! 5. Every target missed: delegate the original specifier to the fallback.

use crate::candidate::{CandidateResolver, Resolution};
use crate::config::PathsConfig;
use crate::matcher::match_request;
use crate::options::EngineOptions;
use crate::pattern::{CompileDiagnostic, CompiledMatcher, PatternCompiler};
use crate::runtime::{Runtime, RuntimeResult};
use crate::services::{FallbackResolver, ModuleResolver};
use crate::tsconfig::{self, ConfigError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// What the host pipeline should do with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome<T> {
    /// Not ours; let the host's default resolution proceed
    Declined,
    /// Fully resolved to an absolute file path
    Resolved(PathBuf),
    /// Handed to the fallback resolver; its result, unchanged
    Delegated(Option<T>),
}

/// Alias resolution engine
///
/// # Example
///
/// ```rust,no_run
/// use fob_paths::{
///     EngineOptions, NativeRuntime, NodeModuleResolver, NodeModulesFallback, PathsConfig,
///     ResolutionEngine, ResolveOutcome,
/// };
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let runtime = Arc::new(NativeRuntime);
/// let modules = Arc::new(NodeModuleResolver::new());
/// let config = PathsConfig::new("/proj").with_alias("~/*", ["./src/*"]);
///
/// let engine = ResolutionEngine::new(
///     config,
///     EngineOptions::default(),
///     modules.clone(),
///     runtime.clone(),
///     NodeModulesFallback::new(runtime, modules),
/// );
///
/// match engine.resolve("~/App", Some("/proj/src/main.ts")).await? {
///     ResolveOutcome::Resolved(path) => println!("{}", path.display()),
///     ResolveOutcome::Delegated(result) => println!("fallback: {:?}", result),
///     ResolveOutcome::Declined => println!("not handled"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResolutionEngine<F> {
    matchers: Vec<CompiledMatcher>,
    diagnostics: Vec<CompileDiagnostic>,
    candidates: CandidateResolver,
    fallback: F,
    options: EngineOptions,
}

impl<F: FallbackResolver> ResolutionEngine<F> {
    /// Compile `config` and wire the engine to its external services
    pub fn new(
        config: PathsConfig,
        options: EngineOptions,
        module_resolver: Arc<dyn ModuleResolver>,
        runtime: Arc<dyn Runtime>,
        fallback: F,
    ) -> Self {
        let compiled = PatternCompiler::new(&options).compile_with_report(&config.alias_table);

        debug!(
            "[fob-paths] Compiled {} alias pattern(s) ({} dropped) against {}",
            compiled.matchers.len(),
            compiled.diagnostics.len(),
            config.base_directory.display()
        );

        Self {
            matchers: compiled.matchers,
            diagnostics: compiled.diagnostics,
            candidates: CandidateResolver::new(
                config.base_directory,
                options.package_dir.clone(),
                module_resolver,
                runtime,
            ),
            fallback,
            options,
        }
    }

    /// Load the alias table from a tsconfig-style project file, then build
    /// the engine
    pub async fn from_project(
        project: &Path,
        options: EngineOptions,
        module_resolver: Arc<dyn ModuleResolver>,
        runtime: Arc<dyn Runtime>,
        fallback: F,
    ) -> Result<Self, ConfigError> {
        let config = tsconfig::load_tsconfig(runtime.as_ref(), project).await?;
        Ok(Self::new(config, options, module_resolver, runtime, fallback))
    }

    /// Compiled matchers, in declaration order
    pub fn matchers(&self) -> &[CompiledMatcher] {
        &self.matchers
    }

    /// Patterns and targets dropped at compile time
    pub fn diagnostics(&self) -> &[CompileDiagnostic] {
        &self.diagnostics
    }

    /// Directory alias targets are resolved against
    pub fn base_directory(&self) -> &Path {
        self.candidates.base_directory()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Decide what to do with a request without calling the fallback
    ///
    /// Returns `None` when the request is declined, otherwise either a
    /// [`Resolution::ResolvedFile`] inside the project or a
    /// [`Resolution::DelegateToFallback`] carrying the specifier the fallback
    /// should receive.
    pub async fn plan(&self, specifier: &str, importer: Option<&str>) -> Option<Resolution> {
        let importer = importer?;

        if self.is_virtual(specifier) || self.matchers.is_empty() {
            return None;
        }

        let Some(matched) = match_request(&self.matchers, specifier) else {
            return Some(Resolution::DelegateToFallback(specifier.to_string()));
        };

        match self.candidates.resolve(&matched, Path::new(importer)).await {
            Resolution::ResolvedFile {
                path,
                is_package_rooted: true,
            } => {
                self.trace_resolution(specifier, &path);
                Some(Resolution::DelegateToFallback(
                    path.to_string_lossy().into_owned(),
                ))
            }
            Resolution::ResolvedFile {
                path,
                is_package_rooted: false,
            } => {
                self.trace_resolution(specifier, &path);
                Some(Resolution::ResolvedFile {
                    path,
                    is_package_rooted: false,
                })
            }
            Resolution::DelegateToFallback(_) | Resolution::NoMatch => {
                Some(Resolution::DelegateToFallback(specifier.to_string()))
            }
        }
    }

    /// Resolve `specifier` imported from `importer`
    ///
    /// Errors come only from the fallback resolver and are returned as-is.
    pub async fn resolve(
        &self,
        specifier: &str,
        importer: Option<&str>,
    ) -> RuntimeResult<ResolveOutcome<F::Output>> {
        let Some(importer) = importer else {
            return Ok(ResolveOutcome::Declined);
        };

        match self.plan(specifier, Some(importer)).await {
            None => Ok(ResolveOutcome::Declined),
            Some(Resolution::ResolvedFile { path, .. }) => Ok(ResolveOutcome::Resolved(path)),
            Some(Resolution::DelegateToFallback(delegated)) => {
                let result = self.fallback.resolve(&delegated, importer).await?;
                Ok(ResolveOutcome::Delegated(result))
            }
            Some(Resolution::NoMatch) => {
                let result = self.fallback.resolve(specifier, importer).await?;
                Ok(ResolveOutcome::Delegated(result))
            }
        }
    }

    fn is_virtual(&self, specifier: &str) -> bool {
        !self.options.virtual_prefix.is_empty()
            && specifier.starts_with(self.options.virtual_prefix.as_str())
    }

    fn trace_resolution(&self, specifier: &str, path: &Path) {
        if self.options.traces_resolutions() {
            debug!("[fob-paths] Resolved '{}' -> {}", specifier, path.display());
        }
    }
}
