#![cfg_attr(docsrs, feature(doc_cfg))]

//! # fob-paths
//!
//! tsconfig-style import alias resolution for bundler resolve hooks.
//!
//! Given a table of alias patterns (`"~/*": ["./src/*"]`) and a base
//! directory, the engine rewrites matching import specifiers into concrete
//! file paths, deferring to a host-supplied module resolver for extension and
//! index probing and to a fallback resolver for everything else.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fob_paths::{
//!     EngineOptions, NativeRuntime, NodeModuleResolver, NodeModulesFallback, ResolutionEngine,
//!     ResolveOutcome,
//! };
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = Arc::new(NativeRuntime);
//! let modules = Arc::new(NodeModuleResolver::new());
//!
//! let engine = ResolutionEngine::from_project(
//!     Path::new("./tsconfig.json"),
//!     EngineOptions::default(),
//!     modules.clone(),
//!     runtime.clone(),
//!     NodeModulesFallback::new(runtime, modules),
//! )
//! .await?;
//!
//! if let ResolveOutcome::Resolved(path) = engine.resolve("~/App", Some("/proj/src/main.ts")).await? {
//!     println!("{}", path.display());
//! }
//! # Ok(()) }
//! ```
//!
//! ## Pieces
//!
//! - [`PatternCompiler`] turns the alias table into ordered [`CompiledMatcher`]s,
//!   dropping patterns and targets it cannot honour.
//! - [`match_request`] picks the matcher for a specifier (exact first, then
//!   longest prefix, ties to the earliest declared).
//! - [`CandidateResolver`] walks a matcher's targets until one resolves.
//! - [`ResolutionEngine`] ties the above to the host's [`ModuleResolver`] and
//!   [`FallbackResolver`].
//!
//! ## Logging
//!
//! The library only emits `tracing` events. Enable the `logging` feature for
//! [`init_logging`](logging::init_logging) if you want a ready-made subscriber.

pub mod candidate;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod node;
pub mod options;
pub mod pattern;
pub mod runtime;
pub mod services;
pub mod tsconfig;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{init_logging, init_logging_from_env};

pub use candidate::{CandidateResolver, Resolution};
pub use config::PathsConfig;
pub use engine::{ResolutionEngine, ResolveOutcome};
pub use matcher::{MatchResult, match_request};
pub use node::{ModuleResolveOptions, NodeModuleResolver, NodeModulesFallback};
pub use options::{CatchAllPolicy, EngineOptions, LogLevel};
pub use pattern::{
    AliasTable, CompileDiagnostic, CompiledMatcher, CompiledTable, DropReason, PatternCompiler,
    WILDCARD,
};
pub use runtime::{FileMetadata, NativeRuntime, Runtime, RuntimeError, RuntimeResult};
pub use services::{FallbackResolver, ModuleResolver};
pub use tsconfig::{ConfigError, DEFAULT_TSCONFIG, find_tsconfig, load_tsconfig};
