//! Fob paths CLI - inspect tsconfig aliases and resolve import specifiers.
//!
//! A thin front end over the `fob-paths` engine. It loads the nearest
//! `tsconfig.json` (or the one passed with `--project`), compiles its
//! `paths`, and either lists the compiled aliases or resolves one specifier
//! exactly as a bundler resolve hook would.
//!
//! # Modules
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - `resolve` and `list` implementations
//! - [`config`] - Layered settings (defaults, config file, environment, flags)
//! - [`error`] - Error types reported through miette
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};
