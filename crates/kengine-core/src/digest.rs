//! # Content Hash: Asset Identity
//!
//! Defines [`ContentHash`], the identifier every stored asset is named by,
//! and [`hash_bytes`], the only way to compute one from raw content.
//!
//! ## Truncation
//!
//! A content hash is the first 8 bytes (16 hex characters) of the SHA-256
//! digest of the payload. Two payloads sharing a truncated hash are treated
//! as identical content. Shorter on-disk names are worth the reduced
//! collision margin for an upload directory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::HashError;

/// Number of SHA-256 bytes retained in a [`ContentHash`].
pub const CONTENT_HASH_BYTES: usize = 8;

/// Length of the lowercase hex rendering of a [`ContentHash`].
pub const CONTENT_HASH_HEX_LEN: usize = CONTENT_HASH_BYTES * 2;

/// Truncated SHA-256 fingerprint of an asset's bytes.
///
/// Renders (and serializes) as 16 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; CONTENT_HASH_BYTES]);

impl ContentHash {
    /// Wrap already-truncated digest bytes.
    pub fn from_bytes(bytes: [u8; CONTENT_HASH_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse a 16-character hex string. Upper-case input is accepted.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        let hex = hex.trim();
        if hex.len() != CONTENT_HASH_HEX_LEN {
            return Err(HashError::InvalidLength {
                expected: CONTENT_HASH_HEX_LEN,
                actual: hex.chars().count(),
            });
        }
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(HashError::NonHex(c));
        }

        let mut bytes = [0u8; CONTENT_HASH_BYTES];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &hex[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| {
                HashError::NonHex(pair.chars().next().unwrap_or_default())
            })?;
        }
        Ok(Self(bytes))
    }

    /// The raw truncated digest bytes.
    pub fn as_bytes(&self) -> &[u8; CONTENT_HASH_BYTES] {
        &self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ContentHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute the content hash of a payload.
///
/// Pure and deterministic: the same bytes always produce the same hash.
pub fn hash_bytes(data: &[u8]) -> ContentHash {
    let digest = Sha256::digest(data);
    let mut bytes = [0u8; CONTENT_HASH_BYTES];
    bytes.copy_from_slice(&digest[..CONTENT_HASH_BYTES]);
    ContentHash(bytes)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Hashing is a pure function of the input bytes.
        #[test]
        fn hash_bytes_deterministic(data in prop::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(hash_bytes(&data), hash_bytes(&data));
        }

        /// Every rendered hash parses back to itself.
        #[test]
        fn hex_rendering_parses_back(data in prop::collection::vec(any::<u8>(), 0..128)) {
            let h = hash_bytes(&data);
            prop_assert_eq!(ContentHash::from_hex(&h.to_hex()).unwrap(), h);
        }
    }
}
