//! # kengine-core: Foundational Types
//!
//! Shared building blocks for the Knowledge Engine asset toolkit:
//!
//! - **Content hashes**: [`ContentHash`], the truncated SHA-256 fingerprint
//!   that names every stored asset, and [`hash_bytes`] to compute it.
//! - **Errors**: [`HashError`] for malformed content-hash strings.
//!
//! ## Crate Policy
//!
//! - No filesystem access. Everything here is pure and deterministic.
//! - Other workspace crates depend on this one, never the reverse.

pub mod digest;
pub mod error;

pub use digest::{hash_bytes, ContentHash, CONTENT_HASH_BYTES, CONTENT_HASH_HEX_LEN};
pub use error::HashError;
