//! Migration driver: threads a document through the rule chain.

use crate::document::CatalogDocument;
use crate::rules::{MethodScope, RULES};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    Changed,
    Unchanged,
    /// The document has no install methods; nothing was attempted.
    NoInstallMethods,
}

/// Outcome of running the rule chain over one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub document: CatalogDocument,
    pub status: MigrationStatus,
    /// Names of the rules that changed the document, in application order.
    pub applied_rules: Vec<&'static str>,
}

impl Migration {
    pub fn changed(&self) -> bool {
        self.status == MigrationStatus::Changed
    }
}

/// Apply every rule in order and fold their change flags.
pub fn process(mut document: CatalogDocument, scope: MethodScope) -> Migration {
    if document.install_method_count() == 0 {
        return Migration {
            document,
            status: MigrationStatus::NoInstallMethods,
            applied_rules: Vec::new(),
        };
    }

    let mut applied_rules = Vec::new();
    for rule in &RULES {
        if (rule.apply)(&mut document, scope) {
            applied_rules.push(rule.name);
        }
    }

    let status = if applied_rules.is_empty() {
        MigrationStatus::Unchanged
    } else {
        MigrationStatus::Changed
    };
    Migration {
        document,
        status,
        applied_rules,
    }
}
