use clap::{Args, Parser, Subcommand, ValueEnum};
use dailyfoss_catalog::DEFAULT_CATALOG_DIR;

#[derive(Parser)]
#[command(
    name = "dailyfoss",
    about = "Daily FOSS: catalog data tooling for the self-hosted application directory",
    version
)]
pub struct Cli {
    /// Diagnostic log format (filter with RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Migrate catalog documents to the current schema, in place
    Migrate {
        #[command(flatten)]
        target: CatalogArgs,

        /// Report what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },

    /// Fail if any catalog document still needs migrating (no writes)
    Check {
        #[command(flatten)]
        target: CatalogArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Directory holding `<slug>.json` catalog documents
    #[arg(default_value = DEFAULT_CATALOG_DIR)]
    pub dir: String,

    /// Apply the platform rules to every install method, not just the first
    #[arg(long)]
    pub all_install_methods: bool,

    /// Output the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
