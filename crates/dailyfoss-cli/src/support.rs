use crate::cli::{CatalogArgs, LogFormat};
use dailyfoss_catalog::{MethodScope, NormalizeOptions, RunReport, run_batch};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "info";

/// Logs go to stderr; stdout carries the report.
pub fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

pub fn options_for(target: &CatalogArgs, dry_run: bool) -> NormalizeOptions {
    NormalizeOptions {
        scope: if target.all_install_methods {
            MethodScope::All
        } else {
            MethodScope::First
        },
        dry_run,
        ..NormalizeOptions::default()
    }
}

pub fn run_batch_or_exit(target: &CatalogArgs, dry_run: bool) -> RunReport {
    run_batch(&target.dir, &options_for(target, dry_run)).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn print_report(report: &RunReport, json: bool) {
    if json {
        let rendered = serde_json::to_string_pretty(report).unwrap_or_else(|e| {
            eprintln!("error: failed to render report: {e}");
            std::process::exit(1);
        });
        println!("{rendered}");
    } else {
        println!("{}", report.render_text());
    }
}
