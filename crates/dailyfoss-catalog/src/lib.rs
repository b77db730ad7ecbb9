//! # dailyfoss-catalog
//!
//! Catalog record normalizer for the Daily FOSS application directory.
//!
//! The catalog is a directory of `<slug>.json` documents. Older documents
//! nest `hosting`, `ui` and `deployment` under `platform`, or carry a
//! top-level `deployment` object; this crate moves them to their current
//! place on the install method and fills defaults.
//!
//! ## Pipeline
//!
//! ```text
//! discover_documents (loader)
//!     → read_document
//!     → process (migrate: RULES in order, changed = OR of rule results)
//!     → write_document, only when changed (writer)
//!     → RunReport (report)
//! ```
//!
//! Runs are idempotent: a second pass over migrated documents changes and
//! writes nothing.

pub mod batch;
pub mod document;
pub mod error;
pub mod loader;
pub mod migrate;
pub mod report;
pub mod rules;
pub mod writer;

pub use batch::{NormalizeOptions, process_entry, run_batch};
pub use document::{
    CatalogDocument, DeploymentFlags, DocumentView, HostingFlags, InstallMethodView, PlatformView,
    UiFlags,
};
pub use error::CatalogError;
pub use loader::{
    CatalogEntry, CatalogLayout, DEFAULT_CATALOG_DIR, DOCUMENT_EXTENSION, METADATA_FILE,
    VERSION_FILE, discover_documents, read_document,
};
pub use migrate::{Migration, MigrationStatus, process};
pub use report::{FileOutcome, FileStatus, RunReport, RunSummary, SkipReason};
pub use rules::{FieldRule, MethodScope, RULES};
pub use writer::{render_document, staging_path, write_document};
