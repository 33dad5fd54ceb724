//! Validated alias configuration consumed by the engine

use crate::pattern::AliasTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Base directory plus alias table, as produced by the project config loader
///
/// The engine assumes this is already validated: `base_directory` is absolute
/// and `alias_table` keeps declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsConfig {
    /// Root that alias targets are resolved against
    pub base_directory: PathBuf,

    /// Pattern -> ordered target templates
    pub alias_table: AliasTable,
}

impl PathsConfig {
    /// Create a configuration with an empty alias table
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            alias_table: AliasTable::new(),
        }
    }

    /// Append an alias; a repeated pattern replaces its targets in place
    pub fn with_alias<I, S>(mut self, pattern: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias_table
            .insert(pattern.into(), targets.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let config = PathsConfig::new("/proj")
            .with_alias("~/*", ["./src/*"])
            .with_alias("utils", ["./lib/utils.ts"])
            .with_alias("~/*", ["./app/*"]);

        let patterns: Vec<_> = config.alias_table.keys().map(String::as_str).collect();
        assert_eq!(patterns, vec!["~/*", "utils"]);
        assert_eq!(config.alias_table["~/*"], vec!["./app/*"]);
    }
}
