//! # AssetStore Handle
//!
//! Binds the directory-parameterized operations in [`crate::assets`] to one
//! base directory. Applications build a single `AssetStore` at bootstrap and
//! hand it to whatever needs it; tests build one per temp directory.
//!
//! Name-based lookups (`read`, `info`, `verify`, ...) only accept plain file
//! names so a caller-supplied name can never address a path outside the
//! store.

use std::path::{Component, Path, PathBuf};

use crate::assets::{self, FileInfo, StoredAsset};
use crate::error::StoreError;

/// A content-addressed asset store rooted at one directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    base_dir: PathBuf,
}

impl AssetStore {
    /// Create a store rooted at `base_dir`.
    ///
    /// The directory does not need to exist yet; the first save creates it.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Return the base directory path.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// See [`assets::save_bytes`].
    pub fn save_bytes(&self, data: &[u8], filename: &str) -> Result<StoredAsset, StoreError> {
        assets::save_bytes(data, filename, &self.base_dir)
    }

    /// See [`assets::save_file`].
    pub fn save_file(&self, temp_path: &Path) -> Result<StoredAsset, StoreError> {
        assets::save_file(temp_path, &self.base_dir)
    }

    /// Copy a file from anywhere into this store. See [`assets::copy_asset`].
    pub fn import(
        &self,
        source_path: &Path,
        new_filename: Option<&str>,
    ) -> Result<StoredAsset, StoreError> {
        assets::copy_asset(source_path, &self.base_dir, new_filename)
    }

    /// Copy a stored asset into another directory.
    pub fn export_to(
        &self,
        name: &str,
        target_dir: &Path,
        new_filename: Option<&str>,
    ) -> Result<StoredAsset, StoreError> {
        let source = self.asset_path(name)?;
        assets::copy_asset(&source, target_dir, new_filename)
    }

    /// Path of a stored name, after checking it is a plain file name.
    pub fn asset_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(assets::get_asset_path(name, &self.base_dir))
    }

    /// Read a stored asset's bytes.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        assets::read_file(&self.asset_path(name)?)
    }

    /// Whether a stored name exists.
    pub fn contains(&self, name: &str) -> Result<bool, StoreError> {
        validate_name(name)?;
        Ok(assets::contains(name, &self.base_dir))
    }

    /// See [`assets::list_assets`].
    pub fn list(&self, extension_filter: Option<&str>) -> Vec<String> {
        assets::list_assets(&self.base_dir, extension_filter)
    }

    /// See [`assets::get_file_info`].
    pub fn info(&self, name: &str) -> Result<FileInfo, StoreError> {
        Ok(assets::get_file_info(&self.asset_path(name)?))
    }

    /// See [`assets::verify_asset`].
    pub fn verify(&self, name: &str) -> Result<bool, StoreError> {
        assets::verify_asset(&self.asset_path(name)?)
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(StoreError::InvalidName(name.to_string())),
    }
}
