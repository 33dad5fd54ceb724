//! Module resolution backed by `oxc_resolver`

use crate::runtime::{RuntimeError, RuntimeResult};
use crate::services::ModuleResolver;
use async_trait::async_trait;
use oxc_resolver::{ResolveError, ResolveOptions, Resolver};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for [`NodeModuleResolver`]
///
/// A subset of [`oxc_resolver::ResolveOptions`], under the same names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleResolveOptions {
    /// Extensions appended to extensionless requests, in probe order
    pub extensions: Vec<String>,

    /// Written extension -> source extensions tried instead
    ///
    /// Lets `import "~/util.js"` find `util.ts`.
    pub extension_alias: Vec<(String, Vec<String>)>,

    /// `package.json` fields read for a directory's entry point, in order
    pub main_fields: Vec<String>,

    /// File stems tried inside a directory (`index`)
    pub main_files: Vec<String>,

    /// Conditions matched against `package.json` `exports` and `imports`
    pub condition_names: Vec<String>,

    /// Dependency directory names searched for bare specifiers
    pub modules: Vec<String>,

    /// Resolve symlinks to their real path
    pub symlinks: bool,
}

impl Default for ModuleResolveOptions {
    fn default() -> Self {
        Self {
            extensions: [
                ".ts", ".tsx", ".mts", ".cts", ".js", ".jsx", ".mjs", ".cjs", ".json",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            extension_alias: vec![
                (".js".into(), vec![".ts".into(), ".tsx".into(), ".js".into()]),
                (".jsx".into(), vec![".tsx".into(), ".jsx".into()]),
                (".mjs".into(), vec![".mts".into(), ".mjs".into()]),
                (".cjs".into(), vec![".cts".into(), ".cjs".into()]),
            ],
            main_fields: vec!["module".into(), "main".into()],
            main_files: vec!["index".into()],
            condition_names: vec!["import".into(), "module".into(), "default".into()],
            modules: vec!["node_modules".into()],
            symlinks: true,
        }
    }
}

impl ModuleResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the probed extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the manifest fields consulted for directory entry points
    pub fn with_main_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the `exports` conditions
    pub fn with_condition_names<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.condition_names = conditions.into_iter().map(Into::into).collect();
        self
    }

    /// Use a different dependency directory name
    pub fn with_package_dir(mut self, dir: impl Into<String>) -> Self {
        self.modules = vec![dir.into()];
        self
    }

    fn to_resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            extensions: self.extensions.clone(),
            extension_alias: self.extension_alias.clone(),
            main_fields: self.main_fields.clone(),
            main_files: self.main_files.clone(),
            condition_names: self.condition_names.clone(),
            modules: self.modules.clone(),
            symlinks: self.symlinks,
            ..Default::default()
        }
    }
}

/// Node-style module resolver
///
/// Wraps an [`oxc_resolver::Resolver`]: extension probing and aliases,
/// `package.json` `exports` and main fields, directory indexes and
/// `node_modules` lookup all follow oxc. Resolution runs on tokio's blocking
/// pool since oxc reads the filesystem synchronously.
#[derive(Debug, Clone)]
pub struct NodeModuleResolver {
    resolver: Arc<Resolver>,
    options: ModuleResolveOptions,
}

impl Default for NodeModuleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeModuleResolver {
    /// Create a resolver with default options
    pub fn new() -> Self {
        Self::with_options(ModuleResolveOptions::default())
    }

    pub fn with_options(options: ModuleResolveOptions) -> Self {
        let resolver = Resolver::new(options.to_resolve_options());
        Self {
            resolver: Arc::new(resolver),
            options,
        }
    }

    pub fn options(&self) -> &ModuleResolveOptions {
        &self.options
    }

    /// Resolve `specifier` as if imported from a file in `directory`
    ///
    /// `Ok(None)` when nothing matches; other resolver failures (a malformed
    /// manifest, a subpath the package does not export) are errors.
    pub async fn resolve_from(
        &self,
        directory: &Path,
        specifier: &str,
    ) -> RuntimeResult<Option<PathBuf>> {
        let resolver = Arc::clone(&self.resolver);
        let dir = directory.to_path_buf();
        let request = specifier.to_string();

        let result = tokio::task::spawn_blocking(move || resolver.resolve(&dir, &request))
            .await
            .map_err(|e| RuntimeError::ResolutionFailed {
                specifier: specifier.to_string(),
                from: directory.to_path_buf(),
                reason: format!("resolver task failed: {}", e),
            })?;

        match result {
            Ok(resolution) => Ok(Some(resolution.path().to_path_buf())),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(RuntimeError::ResolutionFailed {
                specifier: specifier.to_string(),
                from: directory.to_path_buf(),
                reason: err.to_string(),
            }),
        }
    }
}

#[async_trait]
impl ModuleResolver for NodeModuleResolver {
    async fn resolve_module(
        &self,
        candidate: &Path,
        _importer: &Path,
    ) -> RuntimeResult<Option<PathBuf>> {
        let (Some(dir), Some(request)) = (candidate.parent(), candidate.to_str()) else {
            return Ok(None);
        };
        self.resolve_from(dir, request).await
    }
}

fn is_not_found(err: &ResolveError) -> bool {
    matches!(
        err,
        ResolveError::NotFound(_) | ResolveError::ExtensionAlias { .. }
    )
}
