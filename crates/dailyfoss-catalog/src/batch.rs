//! Sequential batch runner over a catalog directory.
//!
//! Files are listed once and processed one at a time: read, migrate, write
//! when changed, record. Per-file failures become report outcomes; only a
//! missing or unlistable directory aborts the run.

use crate::error::CatalogError;
use crate::loader::{CatalogEntry, CatalogLayout, discover_documents, read_document};
use crate::migrate::{MigrationStatus, process};
use crate::report::{FileOutcome, FileStatus, RunReport, SkipReason};
use crate::rules::MethodScope;
use crate::writer::write_document;
use std::path::Path;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub scope: MethodScope,
    /// Run the rules and report, but never write.
    pub dry_run: bool,
    pub layout: CatalogLayout,
}

pub fn run_batch(
    dir: impl AsRef<Path>,
    options: &NormalizeOptions,
) -> Result<RunReport, CatalogError> {
    let dir = dir.as_ref();
    let entries = discover_documents(dir, &options.layout)?;
    info!(
        directory = %dir.display(),
        documents = entries.len(),
        scope = ?options.scope,
        dry_run = options.dry_run,
        "normalizing catalog"
    );

    let mut report = RunReport::new(dir.to_path_buf(), options.dry_run, options.scope);
    for entry in entries {
        let status = match process_entry(&entry, options) {
            Ok(status) => status,
            Err(err) => {
                error!(slug = %entry.slug, kind = err.kind(), "{err}");
                FileStatus::from_error(&err)
            }
        };
        report.record(FileOutcome {
            slug: entry.slug,
            path: entry.path,
            status,
        });
    }

    info!(
        migrated = report.summary.migrated,
        skipped = report.summary.skipped,
        errored = report.summary.errored,
        "catalog normalization finished"
    );
    Ok(report)
}

/// Read, migrate and (unless dry-run) persist one document.
pub fn process_entry(
    entry: &CatalogEntry,
    options: &NormalizeOptions,
) -> Result<FileStatus, CatalogError> {
    let document = read_document(&entry.path)?;
    let migration = process(document, options.scope);

    match migration.status {
        MigrationStatus::NoInstallMethods => {
            warn!(slug = %entry.slug, "no install_methods found; leaving document untouched");
            Ok(FileStatus::Skipped {
                reason: SkipReason::NoInstallMethods,
            })
        }
        MigrationStatus::Unchanged => {
            debug!(slug = %entry.slug, "document already current");
            Ok(FileStatus::Skipped {
                reason: SkipReason::Unchanged,
            })
        }
        MigrationStatus::Changed => {
            if !options.dry_run {
                write_document(&entry.path, &migration.document)?;
            }
            info!(
                slug = %entry.slug,
                rules = ?migration.applied_rules,
                dry_run = options.dry_run,
                "document migrated"
            );
            Ok(FileStatus::Migrated {
                rules: migration.applied_rules,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn dry_run_reports_without_writing() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("foo.json");
        let source = r#"{"slug":"foo","install_methods":[{"platform":{"hosting":{"self_hosted":true}}}]}"#;
        fs::write(&path, source).expect("fixture written");

        let options = NormalizeOptions {
            dry_run: true,
            ..NormalizeOptions::default()
        };
        let report = run_batch(dir.path(), &options).expect("run completes");

        assert_eq!(report.summary.migrated, 1);
        assert!(report.dry_run);
        assert_eq!(fs::read_to_string(&path).expect("file readable"), source);
    }

    #[test]
    fn process_entry_reports_read_errors() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").expect("fixture written");
        let entry = CatalogEntry {
            slug: "broken".to_string(),
            path,
        };

        let err = process_entry(&entry, &NormalizeOptions::default()).unwrap_err();
        assert_eq!(err.kind(), "read_error");
    }
}
