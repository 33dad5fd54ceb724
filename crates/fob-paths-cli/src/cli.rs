//! Command-line interface definition for fob-paths.
//!
//! - `fob-paths resolve <SPECIFIER> --from <IMPORTER>` - resolve one import
//! - `fob-paths list` - show the compiled alias table

use crate::config::SettingsOverrides;
use crate::error::{CliError, Result};
use clap::{Args, Parser, Subcommand};
use fob_paths::LogLevel;
use std::path::PathBuf;

/// fob-paths - tsconfig path alias resolution
#[derive(Parser, Debug)]
#[command(
    name = "fob-paths",
    version,
    about = "Resolve tsconfig path aliases the way a bundler would",
    long_about = "Loads compilerOptions.paths from a tsconfig.json, compiles the alias\n\
                  table and resolves import specifiers against it, falling back to\n\
                  node_modules lookup for everything the aliases don't cover."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Also prints one line per successful alias resolution.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level: silent, error, warn, info or debug
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Settings file (defaults to fob-paths.config.json in the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a single import specifier
    ///
    /// Prints the resolved file, the fallback resolver's answer, or
    /// "declined" when the request is not handled by aliases at all.
    Resolve(ResolveArgs),

    /// List the compiled alias patterns and their targets
    List(ListArgs),
}

/// Arguments for `resolve`
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Import specifier as written in source (e.g. "~/components/Button")
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// File containing the import
    #[arg(long, value_name = "IMPORTER")]
    pub from: PathBuf,

    /// tsconfig.json to load (searched upwards from the importer otherwise)
    #[arg(short, long, value_name = "TSCONFIG")]
    pub project: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// tsconfig.json to load (searched upwards from the working directory otherwise)
    #[arg(short, long, value_name = "TSCONFIG")]
    pub project: Option<PathBuf>,

    /// Print the table as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Absolute working directory for this invocation
    pub fn working_dir(&self) -> Result<PathBuf> {
        let current = std::env::current_dir()?;
        let dir = match &self.cwd {
            Some(cwd) if cwd.is_absolute() => cwd.clone(),
            Some(cwd) => current.join(cwd),
            None => current,
        };

        if !dir.is_dir() {
            return Err(CliError::InvalidArgument(format!(
                "--cwd {} is not a directory",
                dir.display()
            )));
        }
        Ok(dir)
    }

    /// Settings given on the command line, layered over file and environment
    pub fn overrides(&self) -> SettingsOverrides {
        let project = match &self.command {
            Command::Resolve(args) => args.project.clone(),
            Command::List(args) => args.project.clone(),
        };

        SettingsOverrides {
            project,
            log_level: self.log_level,
        }
    }

    /// `--verbose` and `--quiet` win over any configured level
    pub fn effective_log_level(&self, configured: LogLevel) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else if self.quiet {
            LogLevel::Error
        } else {
            configured
        }
    }
}
