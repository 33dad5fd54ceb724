//! Shared test utilities for fob-paths integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use fob_paths::{
    EngineOptions, FallbackResolver, NativeRuntime, NodeModuleResolver, PathsConfig,
    ResolutionEngine, Runtime, RuntimeResult,
};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Fallback that records every `(specifier, importer)` pair it receives and
/// answers with a marker string
#[derive(Debug, Default)]
pub struct RecordingFallback {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingFallback {
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn specifiers(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(s, _)| s.clone()).collect()
    }
}

#[async_trait]
impl FallbackResolver for RecordingFallback {
    type Output = String;

    async fn resolve(&self, specifier: &str, importer: &str) -> RuntimeResult<Option<String>> {
        self.calls
            .lock()
            .push((specifier.to_string(), importer.to_string()));
        Ok(Some(format!("fallback:{}", specifier)))
    }
}

/// Temporary project directory with helpers for laying out files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file, creating parent directories
    pub fn file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        fs::write(&path, content).expect("write file");
        path
    }

    /// Importer path as the host passes it
    pub fn importer(&self, relative: &str) -> String {
        self.path(relative).to_string_lossy().into_owned()
    }
}

pub fn test_runtime() -> Arc<dyn Runtime> {
    Arc::new(NativeRuntime)
}

/// Engine over `config` rebased onto the project root, with the built-in
/// module resolver and a recording fallback
pub fn engine(
    project: &Project,
    config: PathsConfig,
    options: EngineOptions,
) -> ResolutionEngine<Arc<RecordingFallback>> {
    let runtime = test_runtime();
    let config = PathsConfig {
        base_directory: project.root().to_path_buf(),
        ..config
    };

    ResolutionEngine::new(
        config,
        options,
        Arc::new(NodeModuleResolver::new()),
        runtime,
        Arc::new(RecordingFallback::default()),
    )
}

/// Alias table used by the end-to-end scenarios
pub fn scenario_config() -> PathsConfig {
    PathsConfig::default()
        .with_alias("~/*", ["./src/*"])
        .with_alias("utils", ["./lib/utils.ts"])
}
