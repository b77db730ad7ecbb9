//! Run reporting: per-file outcomes and batch totals.

use crate::error::CatalogError;
use crate::rules::MethodScope;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Unchanged,
    NoInstallMethods,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Unchanged => "already current",
            Self::NoInstallMethods => "no install_methods found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Migrated { rules: Vec<&'static str> },
    Skipped { reason: SkipReason },
    Error { kind: &'static str, message: String },
}

impl FileStatus {
    pub fn from_error(error: &CatalogError) -> Self {
        Self::Error {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub slug: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub migrated: usize,
    pub skipped: usize,
    pub errored: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub directory: PathBuf,
    pub dry_run: bool,
    pub scope: MethodScope,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<FileOutcome>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(directory: PathBuf, dry_run: bool, scope: MethodScope) -> Self {
        Self {
            directory,
            dry_run,
            scope,
            started_at: Utc::now(),
            outcomes: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.summary.total += 1;
        match outcome.status {
            FileStatus::Migrated { .. } => self.summary.migrated += 1,
            FileStatus::Skipped { .. } => self.summary.skipped += 1,
            FileStatus::Error { .. } => self.summary.errored += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn has_errors(&self) -> bool {
        self.summary.errored > 0
    }

    pub fn render_line(&self, outcome: &FileOutcome) -> String {
        match &outcome.status {
            FileStatus::Migrated { rules } => {
                let verb = if self.dry_run { "would migrate" } else { "migrated" };
                format!("{verb}: {} ({})", outcome.slug, rules.join(", "))
            }
            FileStatus::Skipped { reason } => {
                format!("skipped: {} ({})", outcome.slug, reason.describe())
            }
            FileStatus::Error { message, .. } => format!("error: {} ({message})", outcome.slug),
        }
    }

    pub fn render_summary(&self) -> String {
        let migrated = if self.dry_run { "would migrate" } else { "migrated" };
        format!(
            "{migrated}: {}, skipped: {}, errors: {}, total: {}",
            self.summary.migrated, self.summary.skipped, self.summary.errored, self.summary.total
        )
    }

    /// Per-file lines followed by the summary line.
    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = self.outcomes.iter().map(|o| self.render_line(o)).collect();
        lines.push(self.render_summary());
        lines.join("\n")
    }
}
