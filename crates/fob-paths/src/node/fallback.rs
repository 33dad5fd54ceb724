//! Generic fallback resolution for non-aliased specifiers

use super::NodeModuleResolver;
use crate::runtime::{Runtime, RuntimeResult};
use crate::services::FallbackResolver;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Fallback resolver for relative, absolute and bare package specifiers
///
/// Relative and bare specifiers resolve from the importer's directory.
/// An absolute path inside a dependency directory (a package-rooted
/// candidate handed over by the engine) is turned back into a bare request
/// from that directory's parent, so the package's `exports` map applies.
#[derive(Debug, Clone)]
pub struct NodeModulesFallback {
    runtime: Arc<dyn Runtime>,
    modules: Arc<NodeModuleResolver>,
}

impl NodeModulesFallback {
    pub fn new(runtime: Arc<dyn Runtime>, modules: Arc<NodeModuleResolver>) -> Self {
        Self { runtime, modules }
    }

    fn importer_dir(&self, importer: &Path) -> RuntimeResult<PathBuf> {
        match importer.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
            _ => self.runtime.get_cwd(),
        }
    }

    /// `/p/node_modules/@scope/pkg/sub` -> (`/p`, `@scope/pkg/sub`)
    fn package_request(&self, path: &Path) -> Option<(PathBuf, String)> {
        let components: Vec<Component<'_>> = path.components().collect();
        let index = components.iter().rposition(|component| {
            self.modules
                .options()
                .modules
                .iter()
                .any(|dir| component.as_os_str() == dir.as_str())
        })?;

        let root: PathBuf = components[..index].iter().collect();
        let request = components[index + 1..]
            .iter()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?
            .join("/");

        (!request.is_empty()).then_some((root, request))
    }
}

#[async_trait]
impl FallbackResolver for NodeModulesFallback {
    type Output = PathBuf;

    async fn resolve(&self, specifier: &str, importer: &str) -> RuntimeResult<Option<PathBuf>> {
        let path = Path::new(specifier);

        if path.is_absolute() {
            if let Some((root, request)) = self.package_request(path) {
                debug!(
                    "[fob-paths] Resolving package request '{}' from {}",
                    request,
                    root.display()
                );
                return self.modules.resolve_from(&root, &request).await;
            }
        }

        let dir = self.importer_dir(Path::new(importer))?;
        self.modules.resolve_from(&dir, specifier).await
    }
}
