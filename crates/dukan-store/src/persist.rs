//! # Document Persistence
//!
//! Loads and saves the store document as pretty-printed JSON.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  save(document, "dukan.json")                                   │
//! │                                                                 │
//! │  1. serialize to a String          (fails → nothing touched)    │
//! │  2. write dukan.json.tmp           (fails → old file intact)    │
//! │  3. rename tmp over dukan.json     (atomic on the same volume)  │
//! │                                                                 │
//! │  A crash at any step leaves either the old document or the new  │
//! │  one on disk, never a half-written file.                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading is deliberately forgiving at startup: a missing or unreadable
//! file means a fresh document, because a shop till that refuses to open
//! is worse than one that starts empty. [`load`] is the strict variant
//! used for restores, where silently discarding a backup would be wrong.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::document::StoreDocument;
use crate::error::PersistError;

/// Reads and parses the document at `path`, then normalizes it.
///
/// Fails if the file is missing or malformed. Used for restores; startup
/// goes through [`load_or_default`] instead.
pub fn load(path: &Path) -> Result<StoreDocument, PersistError> {
    let raw = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut document: StoreDocument =
        serde_json::from_str(&raw).map_err(|source| PersistError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    document.normalize();
    Ok(document)
}

/// Loads the document at `path`, falling back to an empty one.
///
/// A missing file is the normal first run and logs at debug; anything
/// else (unreadable, malformed) logs a warning with the reason. The
/// broken file stays on disk untouched until the next save.
pub fn load_or_default(path: &Path) -> StoreDocument {
    match load(path) {
        Ok(document) => document,
        Err(PersistError::Read { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No document file yet, starting empty");
            StoreDocument::new()
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "Could not load document, starting empty");
            StoreDocument::new()
        }
    }
}

/// Writes the document to `path` atomically.
///
/// Missing parent directories are created. The temporary file lives next
/// to the target so the final rename never crosses a filesystem.
pub fn save(document: &StoreDocument, path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(document).map_err(PersistError::Serialize)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PersistError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|source| PersistError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| PersistError::Replace {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "Document saved");
    Ok(())
}

/// Sibling path for the in-flight write: `dukan.json` → `dukan.json.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push(".tmp");
    path.with_file_name(name)
}
