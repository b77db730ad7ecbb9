//! Persistence: pretty JSON, written atomically.

use crate::document::CatalogDocument;
use crate::error::CatalogError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const STAGING_SUFFIX: &str = ".partial";

/// Two-space indented JSON with a trailing newline.
pub fn render_document(document: &CatalogDocument) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(document)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Replace `path` with the rendered document.
///
/// The content goes to [`staging_path`] first and is renamed over the
/// target, so a failed write leaves the original file intact.
pub fn write_document(
    path: impl AsRef<Path>,
    document: &CatalogDocument,
) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let rendered = render_document(document)
        .map_err(|e| CatalogError::write(path, format!("serialization error: {e}")))?;

    let tmp_path = staging_path(path);
    let write_result = (|| -> Result<(), CatalogError> {
        let mut file = File::create(&tmp_path)
            .map_err(|e| CatalogError::write(&tmp_path, e.to_string()))?;
        file.write_all(rendered.as_bytes())
            .map_err(|e| CatalogError::write(&tmp_path, e.to_string()))?;
        file.sync_all()
            .map_err(|e| CatalogError::write(&tmp_path, e.to_string()))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CatalogError::write(path, format!("rename from {}: {e}", tmp_path.display()))
    })
}

/// Hidden sibling a document is staged in before the rename: `foo.json`
/// stages as `.foo.json.partial`, which discovery never picks up.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(path.as_os_str()));
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}
