//! Command implementations.

use crate::cli::{ListArgs, ResolveArgs};
use crate::config::Settings;
use crate::error::{CliError, Result};
use fob_paths::{
    DEFAULT_TSCONFIG, EngineOptions, LogLevel, NativeRuntime, NodeModuleResolver,
    NodeModulesFallback, ResolutionEngine, ResolveOutcome, Runtime, find_tsconfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Outcome of `resolve`, as printed with `--json`
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub specifier: String,
    pub importer: PathBuf,
    /// `resolved`, `delegated` or `declined`
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Compiled alias table, as printed by `list --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReport {
    pub project: PathBuf,
    pub base_directory: PathBuf,
    pub matchers: Vec<MatcherEntry>,
    pub dropped: Vec<DroppedEntry>,
}

#[derive(Debug, Serialize)]
pub struct MatcherEntry {
    pub pattern: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DroppedEntry {
    pub pattern: String,
    pub reason: String,
}

/// Execute `fob-paths resolve`
pub async fn resolve_execute(
    args: ResolveArgs,
    settings: &Settings,
    level: LogLevel,
    cwd: &Path,
) -> Result<()> {
    let importer = cwd.join(&args.from);
    let search_from = importer.parent().unwrap_or(cwd);
    let engine = build_engine(settings, settings.engine_options(level), search_from).await?;

    let report = resolve_report(&engine, &args.specifier, &importer).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.path {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", report.outcome),
        }
    }
    Ok(())
}

/// Execute `fob-paths list`
pub async fn list_execute(
    args: ListArgs,
    settings: &Settings,
    level: LogLevel,
    cwd: &Path,
) -> Result<()> {
    let project = locate_project(settings, cwd).await?;
    let engine = engine_for(&project, settings.engine_options(level)).await?;
    let report = list_report(&project, &engine);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("project: {}", report.project.display());
    println!("base:    {}", report.base_directory.display());
    if report.matchers.is_empty() {
        println!("\nno aliases");
    } else {
        println!();
        for matcher in &report.matchers {
            println!("{}  ->  {}", matcher.pattern, matcher.targets.join(", "));
        }
    }
    if !report.dropped.is_empty() {
        println!("\ndropped:");
        for dropped in &report.dropped {
            println!("{}  ({})", dropped.pattern, dropped.reason);
        }
    }
    Ok(())
}

/// Run one request through the engine and describe the outcome
///
/// A fallback that finds nothing is an error: there is no file to report.
pub async fn resolve_report(
    engine: &ResolutionEngine<NodeModulesFallback>,
    specifier: &str,
    importer: &Path,
) -> Result<ResolveReport> {
    let importer_str = importer.to_string_lossy();
    let outcome = engine.resolve(specifier, Some(importer_str.as_ref())).await?;

    let (outcome, path) = match outcome {
        ResolveOutcome::Resolved(path) => ("resolved", Some(path)),
        ResolveOutcome::Delegated(Some(path)) => ("delegated", Some(path)),
        ResolveOutcome::Delegated(None) => {
            return Err(CliError::Unresolved {
                specifier: specifier.to_string(),
                importer: importer.to_path_buf(),
            });
        }
        ResolveOutcome::Declined => ("declined", None),
    };

    Ok(ResolveReport {
        specifier: specifier.to_string(),
        importer: importer.to_path_buf(),
        outcome,
        path,
    })
}

/// Describe the engine's compiled table
pub fn list_report(project: &Path, engine: &ResolutionEngine<NodeModulesFallback>) -> ListReport {
    ListReport {
        project: project.to_path_buf(),
        base_directory: engine.base_directory().to_path_buf(),
        matchers: engine
            .matchers()
            .iter()
            .map(|matcher| MatcherEntry {
                pattern: matcher.raw().to_string(),
                targets: matcher.targets().to_vec(),
            })
            .collect(),
        dropped: engine
            .diagnostics()
            .iter()
            .map(|diagnostic| DroppedEntry {
                pattern: diagnostic.pattern.clone(),
                reason: diagnostic.reason.to_string(),
            })
            .collect(),
    }
}

async fn build_engine(
    settings: &Settings,
    options: EngineOptions,
    search_from: &Path,
) -> Result<ResolutionEngine<NodeModulesFallback>> {
    let project = locate_project(settings, search_from).await?;
    engine_for(&project, options).await
}

/// Configured project, or the nearest tsconfig.json above `start_dir`
async fn locate_project(settings: &Settings, start_dir: &Path) -> Result<PathBuf> {
    if let Some(project) = &settings.project {
        return Ok(project.clone());
    }

    let found = find_tsconfig(&NativeRuntime, start_dir, DEFAULT_TSCONFIG).await?;
    debug!("[fob-paths] Using {}", found.display());
    Ok(found)
}

async fn engine_for(
    project: &Path,
    options: EngineOptions,
) -> Result<ResolutionEngine<NodeModulesFallback>> {
    let runtime: Arc<dyn Runtime> = Arc::new(NativeRuntime);
    let modules = Arc::new(NodeModuleResolver::new());
    let fallback = NodeModulesFallback::new(runtime.clone(), modules.clone());

    let engine = ResolutionEngine::from_project(project, options, modules, runtime, fallback).await?;
    Ok(engine)
}
