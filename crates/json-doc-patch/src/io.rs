//! Loading and saving documents.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::document::Document;
use crate::types::{kind_of, DocumentError, SaveOptions};

/// Reads and parses the JSON document at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Document, DocumentError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DocumentError::NotFound(path.to_path_buf()),
        _ => DocumentError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    let doc = Document::try_from(value).map_err(|other| DocumentError::NotAnObject {
        path: path.to_path_buf(),
        found: kind_of(&other),
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "loaded document");
    Ok(doc)
}

/// Writes `doc` to `path`, replacing any existing file.
///
/// The content is written to a temporary file in the same directory, synced,
/// and renamed over `path`, so a failed write never truncates the original.
/// An existing file keeps its permissions, and a symlink at `path` is
/// followed so the link itself survives.
pub fn save(
    doc: &Document,
    path: impl AsRef<Path>,
    options: &SaveOptions,
) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let bytes = doc.to_json_bytes(options).map_err(DocumentError::Serialize)?;
    let io_err = |source: std::io::Error| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    };

    let target = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path).map_err(io_err)?,
        _ => path.to_path_buf(),
    };
    let permissions = match fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(io_err(e)),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    debug!(tmp = %tmp.path().display(), "writing temporary file");
    tmp.write_all(&bytes).map_err(io_err)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(&target).map_err(|e| io_err(e.error))?;

    info!(path = %path.display(), bytes = bytes.len(), "saved document");
    Ok(())
}
