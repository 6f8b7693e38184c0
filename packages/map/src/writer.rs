//! Atomic file output for rendered map documents.
//!
//! Each write goes to a uniquely named temporary file next to the
//! destination and is then renamed over it. Concurrent writers to the same
//! path never interleave bytes, and a reader always sees either the old or
//! the new document in full.

use std::path::{Path, PathBuf};

use crime_overlay_map_models::MapDocument;

use crate::MapError;
use crate::plotly::render_document;

/// Writes `contents` to `path` via a temporary file and rename.
///
/// Creates the parent directory if needed. The temporary file is removed
/// if the rename fails.
///
/// # Errors
///
/// Returns [`MapError::Io`] if the directory, temporary file, or rename
/// fails.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), MapError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .map_or_else(|| "document".into(), |name| name.to_string_lossy());
    let tmp_path = dir.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()));

    std::fs::write(&tmp_path, contents)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Renders `document` and writes it atomically to `path`.
///
/// # Errors
///
/// Returns [`MapError`] if rendering or writing fails.
pub fn write_document(document: &MapDocument, path: &Path) -> Result<PathBuf, MapError> {
    let html = render_document(document)?;
    write_atomic(path, &html)?;
    log::info!(
        "Wrote map with {} layers to {}",
        document.layers.len(),
        path.display()
    );
    Ok(path.to_path_buf())
}
