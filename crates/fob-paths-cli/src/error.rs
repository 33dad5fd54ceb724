//! Error handling for the fob-paths CLI.
//!
//! Every variant is a `miette::Diagnostic`, so `main` can hand any failure to
//! `miette::Report` unchanged. Project configuration errors keep the codes and
//! help text they carry from `fob-paths`.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// tsconfig.json could not be found or loaded
    #[error(transparent)]
    #[diagnostic(transparent)]
    Project(#[from] fob_paths::ConfigError),

    /// The fallback resolver failed
    #[error("Resolution failed: {0}")]
    #[diagnostic(code(fob::paths::cli::resolution_failed))]
    Resolution(#[from] fob_paths::RuntimeError),

    /// Nothing, neither alias nor fallback, produced a file
    #[error("Cannot resolve '{specifier}' from {}", .importer.display())]
    #[diagnostic(
        code(fob::paths::cli::unresolved),
        help("Run 'fob-paths list' to see which aliases are active")
    )]
    Unresolved { specifier: String, importer: PathBuf },

    /// An explicitly requested settings file does not exist
    #[error("Settings file not found: {}", .0.display())]
    #[diagnostic(
        code(fob::paths::cli::settings_not_found),
        help("Create the file or drop --config to use fob-paths.config.json")
    )]
    SettingsNotFound(PathBuf),

    /// Settings could not be merged or have the wrong shape
    #[error("Invalid settings: {message}")]
    #[diagnostic(
        code(fob::paths::cli::invalid_settings),
        help("Check fob-paths.config.json and FOB_PATHS_* environment variables")
    )]
    InvalidSettings { message: String },

    /// Invalid command-line arguments
    #[error("Invalid argument: {0}")]
    #[diagnostic(code(fob::paths::cli::invalid_argument))]
    InvalidArgument(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    #[diagnostic(code(fob::paths::cli::io))]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("JSON error: {0}")]
    #[diagnostic(code(fob::paths::cli::json))]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `CliError` as the default error type
pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_errors_keep_their_code() {
        let err: CliError = fob_paths::ConfigError::NotFound {
            path: PathBuf::from("/p/tsconfig.json"),
        }
        .into();

        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("fob::paths::config_not_found"));
        assert!(err.to_string().contains("/p/tsconfig.json"));
    }

    #[test]
    fn test_unresolved_message() {
        let err = CliError::Unresolved {
            specifier: "left-pad".into(),
            importer: PathBuf::from("/p/src/main.ts"),
        };
        assert_eq!(err.to_string(), "Cannot resolve 'left-pad' from /p/src/main.ts");
    }
}
