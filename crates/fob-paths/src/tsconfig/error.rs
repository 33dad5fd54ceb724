//! Errors raised while loading a project configuration

use crate::runtime::RuntimeError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading `tsconfig.json`-style files
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// No configuration file at the given path (or above it, when searching)
    #[error("Project configuration not found: {}", .path.display())]
    #[diagnostic(
        code(fob::paths::config_not_found),
        help("Pass the path to a tsconfig.json or run from inside the project")
    )]
    NotFound { path: PathBuf },

    /// The file is not valid JSON with comments
    #[error("Failed to parse {}: {message}", .path.display())]
    #[diagnostic(code(fob::paths::config_parse_error))]
    Parse { path: PathBuf, message: String },

    /// `extends` chain loops back onto itself
    #[error("Circular 'extends' chain: {}", format_chain(.chain))]
    #[diagnostic(
        code(fob::paths::extends_cycle),
        help("Remove one of the 'extends' entries so the chain terminates")
    )]
    ExtendsCycle { chain: Vec<PathBuf> },

    /// `extends` names a file that does not exist
    #[error("Cannot find base configuration '{extends}' extended by {}", .from.display())]
    #[diagnostic(code(fob::paths::extends_not_found))]
    ExtendsNotFound { extends: String, from: PathBuf },

    /// `compilerOptions.paths` is present but not an object
    #[error("'compilerOptions.paths' in {} must be an object", .path.display())]
    #[diagnostic(
        code(fob::paths::invalid_paths),
        help("Use the form {{ \"~/*\": [\"./src/*\"] }}")
    )]
    InvalidPaths { path: PathBuf },

    /// Underlying filesystem failure
    #[error(transparent)]
    #[diagnostic(code(fob::paths::runtime))]
    Runtime(#[from] RuntimeError),
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
