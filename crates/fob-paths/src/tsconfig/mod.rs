//! Project configuration loader
//!
//! Reads `compilerOptions.baseUrl` and `compilerOptions.paths` out of a
//! `tsconfig.json`-style file and produces a [`PathsConfig`]. Files are parsed
//! as JSON5, so comments and trailing commas are accepted.
//!
//! `extends` is followed (a single string or an array, later entries win),
//! with the extending file overriding whatever it inherits:
//!
//! - `baseUrl` is relative to the file that declares it;
//! - `paths` targets are relative to the effective `baseUrl`, or to the
//!   directory of the file that declares `paths` when there is none.

mod error;

pub use error::ConfigError;

use crate::config::PathsConfig;
use crate::pattern::AliasTable;
use crate::runtime::{Runtime, RuntimeError};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::{debug, warn};

/// File name searched for by [`find_tsconfig`]
pub const DEFAULT_TSCONFIG: &str = "tsconfig.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTsConfig {
    extends: Option<Extends>,
    #[serde(rename = "compilerOptions")]
    compiler_options: Option<RawCompilerOptions>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn into_vec(self) -> Vec<String> {
        match self {
            Extends::One(single) => vec![single],
            Extends::Many(many) => many,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
    paths: Option<RawPaths>,
}

/// `paths` as written; anything but an object is rejected after parsing
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPaths {
    Map(IndexMap<String, Value>),
    Other(Value),
}

/// Options contributed by one file of an `extends` chain, already absolute
#[derive(Debug, Default)]
struct Layer {
    base_url: Option<PathBuf>,
    paths: Option<DeclaredPaths>,
}

#[derive(Debug)]
struct DeclaredPaths {
    table: AliasTable,
    declared_in: PathBuf,
}

impl Layer {
    fn overlay(&mut self, other: Layer) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.paths.is_some() {
            self.paths = other.paths;
        }
    }
}

type LayerFuture<'a> = Pin<Box<dyn Future<Output = Result<Layer, ConfigError>> + Send + 'a>>;

/// Walk up from `start_dir` until a file called `file_name` is found
pub async fn find_tsconfig(
    runtime: &dyn Runtime,
    start_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, ConfigError> {
    let mut current = Some(start_dir);

    while let Some(dir) = current {
        let candidate = dir.join(file_name);
        if runtime.is_file(&candidate).await {
            return Ok(candidate);
        }
        current = dir.parent();
    }

    Err(ConfigError::NotFound {
        path: start_dir.join(file_name),
    })
}

/// Load the alias configuration declared by `path`
///
/// `path` may be a configuration file or a directory containing
/// [`DEFAULT_TSCONFIG`]. Relative paths are taken from the runtime's working
/// directory.
pub async fn load_tsconfig(runtime: &dyn Runtime, path: &Path) -> Result<PathsConfig, ConfigError> {
    let path = if path.is_absolute() {
        path_clean::clean(path)
    } else {
        path_clean::clean(runtime.get_cwd()?.join(path))
    };
    let path = if runtime.is_dir(&path).await {
        path.join(DEFAULT_TSCONFIG)
    } else {
        path
    };

    let mut chain = Vec::new();
    let layer = load_layer(runtime, path.clone(), &mut chain).await?;

    let config_dir = parent_dir(&path);
    let (base_directory, alias_table) = match (layer.base_url, layer.paths) {
        (Some(base_url), Some(paths)) => (base_url, paths.table),
        (Some(base_url), None) => (base_url, AliasTable::new()),
        (None, Some(paths)) => (paths.declared_in, paths.table),
        (None, None) => (config_dir, AliasTable::new()),
    };

    debug!(
        "[fob-paths] Loaded {} alias pattern(s) from {} (base {})",
        alias_table.len(),
        path.display(),
        base_directory.display()
    );

    Ok(PathsConfig {
        base_directory,
        alias_table,
    })
}

fn load_layer<'a>(
    runtime: &'a dyn Runtime,
    path: PathBuf,
    chain: &'a mut Vec<PathBuf>,
) -> LayerFuture<'a> {
    Box::pin(async move {
        if chain.contains(&path) {
            let mut cycle = chain.clone();
            cycle.push(path);
            return Err(ConfigError::ExtendsCycle { chain: cycle });
        }

        let raw = read_raw(runtime, &path).await?;
        let dir = parent_dir(&path);

        let mut merged = Layer::default();
        chain.push(path.clone());
        for extends in raw.extends.map(Extends::into_vec).unwrap_or_default() {
            let parent = resolve_extends(runtime, &dir, &extends)
                .await
                .ok_or_else(|| ConfigError::ExtendsNotFound {
                    extends: extends.clone(),
                    from: path.clone(),
                })?;
            merged.overlay(load_layer(runtime, parent, &mut *chain).await?);
        }
        chain.pop();

        merged.overlay(own_layer(&path, &dir, raw.compiler_options.unwrap_or_default())?);
        Ok(merged)
    })
}

async fn read_raw(runtime: &dyn Runtime, path: &Path) -> Result<RawTsConfig, ConfigError> {
    let bytes = match runtime.read_file(path).await {
        Ok(bytes) => bytes,
        Err(RuntimeError::FileNotFound(_)) => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let text = String::from_utf8_lossy(&bytes);
    json5::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn own_layer(path: &Path, dir: &Path, options: RawCompilerOptions) -> Result<Layer, ConfigError> {
    let base_url = options
        .base_url
        .map(|base_url| path_clean::clean(dir.join(base_url)));

    let paths = match options.paths {
        None => None,
        Some(RawPaths::Other(_)) => {
            return Err(ConfigError::InvalidPaths {
                path: path.to_path_buf(),
            });
        }
        Some(RawPaths::Map(entries)) => Some(DeclaredPaths {
            table: alias_table(path, entries),
            declared_in: dir.to_path_buf(),
        }),
    };

    Ok(Layer { base_url, paths })
}

/// Keep well-formed entries (arrays of strings) in order, dropping the rest
fn alias_table(path: &Path, entries: IndexMap<String, Value>) -> AliasTable {
    let mut table = AliasTable::with_capacity(entries.len());

    for (pattern, value) in entries {
        let targets = value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
        });

        match targets {
            Some(targets) => {
                table.insert(pattern, targets);
            }
            None => warn!(
                "[fob-paths] Ignoring paths entry '{}' in {}: expected an array of strings",
                pattern,
                path.display()
            ),
        }
    }

    table
}

/// Locate the file named by an `extends` entry
///
/// Relative and absolute entries are taken as file paths (`.json` is appended
/// when missing). Anything else is looked up in `node_modules` above `dir`,
/// either as a file or as a package directory holding `tsconfig.json`.
async fn resolve_extends(runtime: &dyn Runtime, dir: &Path, extends: &str) -> Option<PathBuf> {
    let written = Path::new(extends);

    if written.is_absolute() || extends.starts_with("./") || extends.starts_with("../") {
        return probe_config_file(runtime, &path_clean::clean(dir.join(written))).await;
    }

    let mut current = Some(dir);
    while let Some(search) = current {
        let candidate = search.join("node_modules").join(extends);
        if let Some(found) = probe_config_file(runtime, &candidate).await {
            return Some(found);
        }
        let nested = candidate.join(DEFAULT_TSCONFIG);
        if runtime.is_file(&nested).await {
            return Some(nested);
        }
        current = search.parent();
    }

    None
}

async fn probe_config_file(runtime: &dyn Runtime, path: &Path) -> Option<PathBuf> {
    if runtime.is_file(path).await {
        return Some(path.to_path_buf());
    }

    if path.extension().is_none_or(|ext| ext != "json") {
        let mut with_json = path.as_os_str().to_os_string();
        with_json.push(".json");
        let with_json = PathBuf::from(with_json);
        if runtime.is_file(&with_json).await {
            return Some(with_json);
        }
    }

    None
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
