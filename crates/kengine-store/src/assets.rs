//! # Asset Operations
//!
//! Directory-parameterized operations over a flat, content-addressed upload
//! directory. Every stored file is named `{hash}{ext}`, where `hash` is the
//! 16-char [`ContentHash`] of its bytes and `ext` is the extension of the
//! name it was uploaded under (case preserved, including the dot).
//!
//! ## Deduplication Invariant
//!
//! Identical bytes uploaded with the same extension always land on the same
//! file. A save whose target already exists writes nothing and returns the
//! existing name. Creation uses `create_new`, so concurrent writers of the
//! same content race harmlessly: one creates, the rest observe
//! `AlreadyExists`.
//!
//! ## Failure Semantics
//!
//! - Writes and reads propagate [`StoreError`], logged at `error` first.
//! - [`list_assets`] and [`get_file_info`] never fail; missing resources come
//!   back as empty or negative results.
//! - Temp-file cleanup in [`save_file`] is best effort and only warns.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kengine_core::{hash_bytes, ContentHash};
use serde::Serialize;

use crate::error::StoreError;

/// Default upload directory, relative to the working directory.
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome of a save: the content hash and the file name it is stored under.
///
/// Returned identically whether the file was written or already present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAsset {
    /// Truncated SHA-256 of the stored bytes.
    pub hash: ContentHash,
    /// `{hash}{ext}` file name inside the store directory.
    pub stored_name: String,
}

impl StoredAsset {
    /// Full path of this asset inside `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        get_asset_path(&self.stored_name, dir)
    }
}

/// Metadata of a file that exists and could be hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDetails {
    /// Size in bytes.
    pub size: u64,
    /// Content hash of the file's bytes.
    pub hash: ContentHash,
    /// Final path component.
    pub filename: String,
    /// Extension including the leading dot, or empty.
    pub extension: String,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// Result of [`get_file_info`].
///
/// Serializes as `{"exists": true, "size": .., "hash": .., ...}` for a
/// readable file, `{"exists": false}` for a missing one, and
/// `{"exists": false, "error": ".."}` when inspection failed otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub exists: bool,
    #[serde(flatten)]
    pub details: Option<FileDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileInfo {
    fn present(details: FileDetails) -> Self {
        Self {
            exists: true,
            details: Some(details),
            error: None,
        }
    }

    fn missing() -> Self {
        Self {
            exists: false,
            details: None,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            exists: false,
            details: None,
            error: Some(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Extension of `filename` including the dot, case preserved.
///
/// Only the last path component is considered. Names without a dot and
/// dot-files such as `.env` have no extension.
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

fn io_failure(op: &'static str, path: &Path, source: io::Error) -> StoreError {
    tracing::error!(op, path = %path.display(), error = %source, "asset store I/O failure");
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Store `data` in `dir` under `{hash}{ext}`, creating `dir` if needed.
///
/// `filename` only contributes its extension. If the target file already
/// exists nothing is written.
pub fn save_bytes(data: &[u8], filename: &str, dir: &Path) -> Result<StoredAsset, StoreError> {
    let hash = hash_bytes(data);
    let stored = StoredAsset {
        hash,
        stored_name: format!("{hash}{}", extension_of(filename)),
    };

    fs::create_dir_all(dir).map_err(|e| io_failure("create_dir", dir, e))?;

    let path = stored.path_in(dir);
    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(mut f) => {
            if let Err(e) = f.write_all(data) {
                // A truncated blob would be mistaken for a dedup hit later.
                drop(f);
                let _ = fs::remove_file(&path);
                return Err(io_failure("write", &path, e));
            }
            tracing::info!(
                hash = %hash,
                stored_name = %stored.stored_name,
                size = data.len(),
                "stored new asset"
            );
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if !path.is_file() {
                return Err(io_failure(
                    "create",
                    &path,
                    io::Error::new(io::ErrorKind::AlreadyExists, "non-file entry occupies asset name"),
                ));
            }
            tracing::debug!(
                hash = %hash,
                stored_name = %stored.stored_name,
                "asset already stored, skipping write"
            );
        }
        Err(e) => return Err(io_failure("create", &path, e)),
    }

    Ok(stored)
}

/// Store the contents of an uploaded temp file, then remove the temp file.
///
/// The temp file's own name supplies the extension. Reading it must succeed;
/// removing it afterwards is best effort.
pub fn save_file(temp_path: &Path, dir: &Path) -> Result<StoredAsset, StoreError> {
    let data = fs::read(temp_path).map_err(|e| io_failure("read", temp_path, e))?;
    let stored = save_bytes(&data, &file_name_of(temp_path), dir)?;
    remove_temp_file(temp_path);
    Ok(stored)
}

/// Remove a consumed temp file, tolerating it being gone already.
fn remove_temp_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed temp file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "temp file already removed");
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not remove temp file");
        }
    }
}

/// Read a file fully.
pub fn read_file(path: &Path) -> Result<Vec<u8>, StoreError> {
    fs::read(path).map_err(|e| io_failure("read", path, e))
}

/// Join a stored name onto a store directory. No I/O.
pub fn get_asset_path(name: &str, dir: &Path) -> PathBuf {
    dir.join(name)
}

/// Whether `name` exists as a file in `dir`.
pub fn contains(name: &str, dir: &Path) -> bool {
    get_asset_path(name, dir).is_file()
}

/// Sorted names of the regular files in `dir`.
///
/// With `extension_filter`, only names ending in that suffix (compared
/// case-insensitively) are returned. A missing or unreadable directory
/// yields an empty list.
pub fn list_assets(dir: &Path, extension_filter: Option<&str>) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "asset directory does not exist");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "could not list asset directory");
            return Vec::new();
        }
    };

    let suffix = extension_filter.map(str::to_lowercase);
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        // Follows symlinks: a link to a regular file is listed.
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| match &suffix {
            Some(s) => name.to_lowercase().ends_with(s.as_str()),
            None => true,
        })
        .collect();
    names.sort();
    names
}

/// Re-save an existing file into `target_dir` with dedup semantics.
///
/// `new_filename`, when given, replaces the source name for extension
/// derivation.
pub fn copy_asset(
    source_path: &Path,
    target_dir: &Path,
    new_filename: Option<&str>,
) -> Result<StoredAsset, StoreError> {
    let data = read_file(source_path)?;
    let filename = match new_filename {
        Some(name) => name.to_string(),
        None => file_name_of(source_path),
    };
    save_bytes(&data, &filename, target_dir)
}

/// Inspect a file without ever failing.
pub fn get_file_info(path: &Path) -> FileInfo {
    match collect_details(path) {
        Ok(details) => FileInfo::present(details),
        Err(e) if e.kind() == io::ErrorKind::NotFound => FileInfo::missing(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not inspect file");
            FileInfo::failed(e.to_string())
        }
    }
}

fn collect_details(path: &Path) -> io::Result<FileDetails> {
    let meta = fs::metadata(path)?;
    let data = fs::read(path)?;
    let filename = file_name_of(path);
    Ok(FileDetails {
        size: meta.len(),
        hash: hash_bytes(&data),
        extension: extension_of(&filename),
        filename,
        modified: DateTime::<Utc>::from(meta.modified()?),
    })
}

/// Check that a stored file still hashes to the hash in its name.
///
/// Returns `Ok(false)` on mismatch or when the file stem is not a lowercase
/// content hash. Read failures propagate.
pub fn verify_asset(path: &Path) -> Result<bool, StoreError> {
    let stem = path.file_stem().and_then(|s| s.to_str());
    // Only the canonical lowercase rendering is a name the store produces.
    let expected = match stem.map(|s| (s, ContentHash::from_hex(s))) {
        Some((s, Ok(h))) if h.to_hex() == s => h,
        _ => {
            tracing::warn!(path = %path.display(), "file name does not encode a content hash");
            return Ok(false);
        }
    };

    let actual = hash_bytes(&read_file(path)?);
    if actual != expected {
        tracing::warn!(
            path = %path.display(),
            expected = %expected,
            actual = %actual,
            "asset content does not match its name"
        );
        return Ok(false);
    }
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
