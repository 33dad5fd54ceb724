//! fob-paths - resolve tsconfig path aliases from the command line.

use clap::Parser;
use fob_paths_cli::{cli, commands, config, logger};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let cwd = args.working_dir()?;
    let settings = config::Settings::load(&cwd, args.config.as_deref(), args.overrides())?;
    let level = args.effective_log_level(settings.log_level);

    logger::init_logger(level, args.no_color);

    let result = match args.command {
        cli::Command::Resolve(resolve_args) => {
            commands::resolve_execute(resolve_args, &settings, level, &cwd).await
        }
        cli::Command::List(list_args) => {
            commands::list_execute(list_args, &settings, level, &cwd).await
        }
    };

    result.map_err(miette::Report::new)
}
