//! Opaque identifiers for keys.

use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::fmt;

/// An opaque identifier for a key, derived from a digest of the key material.
///
/// Two keys with the same material have the same identifier regardless of how
/// the key is containerized or transported.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct KeyId {
    digest: Bytes,
}

impl KeyId {
    /// Create a key identifier from a precomputed digest.
    pub fn new(digest: impl Into<Bytes>) -> Self {
        Self {
            digest: digest.into(),
        }
    }

    /// Derive a key identifier by hashing the key material with SHA-256.
    pub fn from_key_material(material: &[u8]) -> Self {
        let digest = Sha256::digest(material);
        Self {
            digest: Bytes::copy_from_slice(&digest),
        }
    }

    /// Returns the digest bytes of the identifier.
    pub fn as_bytes(&self) -> &[u8] {
        &self.digest
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.digest.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({self})")
    }
}
