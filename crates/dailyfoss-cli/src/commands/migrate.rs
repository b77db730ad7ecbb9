use crate::cli::CatalogArgs;
use crate::support::{print_report, run_batch_or_exit};

/// Per-file errors are reported but do not fail the command; only a missing
/// or unreadable catalog directory does.
pub fn run(target: CatalogArgs, dry_run: bool) {
    let report = run_batch_or_exit(&target, dry_run);
    print_report(&report, target.json);
}
