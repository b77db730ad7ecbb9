//! Daily FOSS CLI: the `dailyfoss` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_logging(cli.log_format);

    match cli.command {
        Commands::Migrate { target, dry_run } => commands::migrate::run(target, dry_run),
        Commands::Check { target } => commands::check::run(target),
    }
}
