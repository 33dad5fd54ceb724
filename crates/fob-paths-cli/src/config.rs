//! Layered settings for the CLI.
//!
//! Priority: command-line flags > `FOB_PATHS_*` environment variables >
//! `fob-paths.config.json` > defaults.

use crate::error::{CliError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use fob_paths::{CatchAllPolicy, EngineOptions, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory
pub const CONFIG_FILE: &str = "fob-paths.config.json";

/// Prefix for environment overrides (`FOB_PATHS_LOG_LEVEL=debug`)
pub const ENV_PREFIX: &str = "FOB_PATHS_";

/// Resolved CLI settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// tsconfig.json to load instead of searching for one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<PathBuf>,

    pub log_level: LogLevel,

    /// How to treat a bare `"*"` alias
    pub catch_all: CatchAllPolicy,

    /// Directory names whose targets only hold type declarations
    pub declaration_dirs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let engine = EngineOptions::default();
        Self {
            project: None,
            log_level: engine.log_level,
            catch_all: engine.catch_all,
            declaration_dirs: engine.declaration_dirs,
        }
    }
}

/// Values given as flags; unset fields leave lower layers alone
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
}

impl Settings {
    /// Load settings for a run in `cwd`
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    /// A relative `project` is taken relative to `cwd`.
    pub fn load(
        cwd: &Path,
        config_path: Option<&Path>,
        overrides: SettingsOverrides,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(CliError::SettingsNotFound(path));
                }
                Some(path)
            }
            None => Some(cwd.join(CONFIG_FILE)).filter(|path| path.is_file()),
        };

        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        figment = figment
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .lowercase(false)
                    .map(|key| camel_case(key.as_str()).into()),
            )
            .merge(Serialized::defaults(overrides));

        let mut settings: Self = figment.extract().map_err(|e| CliError::InvalidSettings {
            message: e.to_string(),
        })?;

        settings.project = settings.project.map(|project| cwd.join(project));
        Ok(settings)
    }

    /// Engine options for this run at the given effective log level
    pub fn engine_options(&self, level: LogLevel) -> EngineOptions {
        EngineOptions::default()
            .with_log_level(level)
            .with_catch_all(self.catch_all)
            .with_declaration_dirs(self.declaration_dirs.iter().cloned())
    }
}

/// `log_level` -> `logLevel`, so env keys line up with the JSON field names
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
