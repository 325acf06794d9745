//! wpackio CLI entry point: parse arguments, set up logging and colors, and
//! dispatch the command.

use clap::Parser;
use miette::Result;
use wpackio_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args, args.quiet).await,
    };

    // Convert CLI errors to miette diagnostics for the final report
    result.map_err(error::cli_error_to_miette)
}
