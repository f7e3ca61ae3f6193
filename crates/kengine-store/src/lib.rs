//! # kengine-store: Content-Addressed Asset Store
//!
//! Persists uploaded media (images, documents, audio, video) into a flat
//! directory, default [`DEFAULT_UPLOAD_DIR`], naming every file by the
//! truncated SHA-256 of its bytes plus its original extension:
//!
//! ```text
//! static/uploads/
//!   3e23e8160039594a.txt
//!   ca978112ca1bbdca.png
//! ```
//!
//! No manifest or index is written; membership is whatever the directory
//! listing says. Blobs are immutable and there is no delete operation.
//!
//! Two ways in:
//!
//! - [`assets`]: free functions that take the directory explicitly.
//! - [`AssetStore`]: a handle bound to one directory, built once at
//!   application bootstrap and passed to consumers.
//!
//! ```rust,no_run
//! use kengine_store::AssetStore;
//!
//! let store = AssetStore::new("static/uploads");
//! let stored = store.save_bytes(b"%PDF-1.7 ...", "report.PDF")?;
//! assert!(stored.stored_name.ends_with(".PDF"));
//! # Ok::<(), kengine_store::StoreError>(())
//! ```

pub mod assets;
pub mod error;
pub mod store;

pub use assets::{
    copy_asset, extension_of, get_asset_path, get_file_info, list_assets, read_file, save_bytes,
    save_file, verify_asset, FileDetails, FileInfo, StoredAsset, DEFAULT_UPLOAD_DIR,
};
pub use error::StoreError;
pub use kengine_core::{hash_bytes, ContentHash};
pub use store::AssetStore;
