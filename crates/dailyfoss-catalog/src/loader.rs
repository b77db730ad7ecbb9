//! Document discovery and reading.
//!
//! A catalog directory holds one `<slug>.json` file per application plus a
//! couple of reserved bookkeeping files that are not documents.

use crate::document::CatalogDocument;
use crate::error::CatalogError;
use std::fs;
use std::path::{Path, PathBuf};

pub const DOCUMENT_EXTENSION: &str = "json";
pub const METADATA_FILE: &str = "metadata.json";
pub const VERSION_FILE: &str = "version.json";
pub const DEFAULT_CATALOG_DIR: &str = "public/json";

/// One discovered catalog document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub slug: String,
    pub path: PathBuf,
}

/// Which files in a catalog directory count as documents.
#[derive(Debug, Clone, Copy)]
pub struct CatalogLayout {
    pub extension: &'static str,
    pub reserved: &'static [&'static str],
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self {
            extension: DOCUMENT_EXTENSION,
            reserved: &[METADATA_FILE, VERSION_FILE],
        }
    }
}

impl CatalogLayout {
    /// Slug for a document file name, or `None` for anything that is not a
    /// catalog document.
    pub fn slug_for(&self, file_name: &str) -> Option<String> {
        if self.reserved.contains(&file_name) {
            return None;
        }
        let (stem, extension) = file_name.rsplit_once('.')?;
        if extension != self.extension || stem.is_empty() {
            return None;
        }
        Some(stem.to_string())
    }
}

/// List the catalog documents in `dir`, sorted by file name.
pub fn discover_documents(
    dir: impl AsRef<Path>,
    layout: &CatalogLayout,
) -> Result<Vec<CatalogEntry>, CatalogError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CatalogError::directory_not_found(dir));
    }

    let listing =
        fs::read_dir(dir).map_err(|e| CatalogError::list_directory(dir, e.to_string()))?;
    let mut entries = Vec::new();
    for item in listing {
        let item = item.map_err(|e| CatalogError::list_directory(dir, e.to_string()))?;
        let path = item.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(slug) = layout.slug_for(file_name) {
            entries.push(CatalogEntry { slug, path });
        }
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Read and parse one catalog document.
pub fn read_document(path: impl AsRef<Path>) -> Result<CatalogDocument, CatalogError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| CatalogError::read(path, e.to_string()))?;
    let text = validate_document_bytes(path, &bytes)?;
    serde_json::from_str(text)
        .map_err(|e| CatalogError::read(path, format!("invalid document: {e}")))
}

fn validate_document_bytes<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a str, CatalogError> {
    if bytes.contains(&0) {
        return Err(CatalogError::read(path, "contains NUL byte(s)"));
    }
    std::str::from_utf8(bytes)
        .map_err(|_| CatalogError::read(path, "contains non-UTF-8 byte sequence(s)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn slug_for_skips_reserved_and_foreign_files() {
        let layout = CatalogLayout::default();
        assert_eq!(layout.slug_for("gitea.json").as_deref(), Some("gitea"));
        assert_eq!(layout.slug_for("home.assistant.json").as_deref(), Some("home.assistant"));
        assert_eq!(layout.slug_for("metadata.json"), None);
        assert_eq!(layout.slug_for("version.json"), None);
        assert_eq!(layout.slug_for("README.md"), None);
        assert_eq!(layout.slug_for(".json"), None);
        assert_eq!(layout.slug_for("json"), None);
    }

    #[test]
    fn discover_documents_lists_sorted_documents_only() {
        let dir = tempdir().expect("temp dir");
        for name in ["zulip.json", "metadata.json", "version.json", "authelia.json", "notes.txt"] {
            fs::write(dir.path().join(name), "{}").expect("fixture written");
        }
        fs::create_dir(dir.path().join("nested.json")).expect("nested dir");

        let entries = discover_documents(dir.path(), &CatalogLayout::default()).expect("listing");
        let slugs: Vec<&str> = entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, ["authelia", "zulip"]);
    }

    #[test]
    fn missing_directory_is_directory_not_found() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("absent");

        let err = discover_documents(&missing, &CatalogLayout::default()).unwrap_err();
        assert!(matches!(err, CatalogError::DirectoryNotFound { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn read_document_rejects_malformed_and_binary_files() {
        let dir = tempdir().expect("temp dir");
        let malformed = dir.path().join("broken.json");
        fs::write(&malformed, "{ \"slug\": ").expect("fixture written");
        let binary = dir.path().join("binary.json");
        fs::write(&binary, b"{\"slug\":\"a\0\"}").expect("fixture written");

        let err = read_document(&malformed).unwrap_err();
        assert_eq!(err.kind(), "read_error");
        assert!(err.to_string().contains("invalid document"));

        let err = read_document(&binary).unwrap_err();
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn read_document_rejects_invalid_utf8() {
        let dir = tempdir().expect("temp dir");
        let latin1 = dir.path().join("latin1.json");
        fs::write(&latin1, b"{\"name\":\"Caf\xe9\"}").expect("fixture written");

        let err = read_document(&latin1).unwrap_err();
        assert_eq!(err.kind(), "read_error");
        assert!(err.to_string().contains("non-UTF-8"), "{err}");
    }
}
