use crate::cli::CatalogArgs;
use crate::support::{print_report, run_batch_or_exit};

pub fn run(target: CatalogArgs) {
    let report = run_batch_or_exit(&target, true);
    print_report(&report, target.json);

    let pending = report.summary.migrated;
    if pending > 0 || report.has_errors() {
        eprintln!(
            "check failed: {pending} document(s) need migrating, {} could not be processed",
            report.summary.errored
        );
        std::process::exit(1);
    }
}
