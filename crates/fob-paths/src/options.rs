//! Engine configuration
//!
//! Everything the engine would otherwise read from ambient state (log
//! verbosity, environment-derived defaults) is carried here and passed to
//! the engine's constructor.

use serde::{Deserialize, Serialize};

/// Log level for fob-paths diagnostics
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging output
    #[serde(alias = "off")]
    Silent,
    /// Only errors
    Error,
    /// Errors and warnings
    #[serde(alias = "warning")]
    Warn,
    /// Errors, warnings, and info (default)
    #[default]
    Info,
    /// All logs including one line per successful alias resolution
    Debug,
}

impl LogLevel {
    /// Convert to tracing filter string
    pub(crate) fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter())
    }
}

/// What to do with a pattern that is nothing but the wildcard (`"*"`)
///
/// Some configurations use `"*"` as a "match everything" alias, others treat it
/// as a mistake. Neither is assumed; the caller decides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatchAllPolicy {
    /// Compile `"*"` like any other wildcard pattern (empty prefix and suffix)
    #[default]
    Accept,
    /// Drop `"*"` at compile time with a diagnostic
    Reject,
}

/// Options for [`ResolutionEngine`](crate::ResolutionEngine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Verbosity of compile diagnostics and resolution tracing
    pub log_level: LogLevel,

    /// Policy for the bare `"*"` pattern
    pub catch_all: CatchAllPolicy,

    /// Directory names whose contents are type declarations only
    ///
    /// Targets under one of these are dropped at compile time. Scoped names
    /// (`@types`) match at any depth, plain names (`types`) only as the first
    /// segment of the target.
    pub declaration_dirs: Vec<String>,

    /// Specifier prefix the host pipeline reserves for its own virtual modules
    pub virtual_prefix: String,

    /// Directory name used by the package manager for installed dependencies
    pub package_dir: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            catch_all: CatchAllPolicy::default(),
            declaration_dirs: vec!["@types".to_string(), "types".to_string()],
            virtual_prefix: "\0".to_string(),
            package_dir: "node_modules".to_string(),
        }
    }
}

impl EngineOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the policy for the bare `"*"` pattern
    pub fn with_catch_all(mut self, policy: CatchAllPolicy) -> Self {
        self.catch_all = policy;
        self
    }

    /// Replace the list of type-declaration directory names
    pub fn with_declaration_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declaration_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the virtual module prefix reserved by the host
    pub fn with_virtual_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.virtual_prefix = prefix.into();
        self
    }

    /// Set the package manager's dependency directory name
    pub fn with_package_dir(mut self, dir: impl Into<String>) -> Self {
        self.package_dir = dir.into();
        self
    }

    /// Whether compile diagnostics should be emitted as warnings
    pub(crate) fn warns(&self) -> bool {
        self.log_level >= LogLevel::Warn
    }

    /// Whether each successful alias resolution should be traced
    pub(crate) fn traces_resolutions(&self) -> bool {
        self.log_level == LogLevel::Debug
    }
}
