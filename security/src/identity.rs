//! Credential sources that produce signers.

use crate::{Error, MemorySigner, Signer};
use bytes::Bytes;
use std::fmt;

/// A credential source that can produce a [`Signer`].
///
/// An identity names who is signing; the signer it produces does the
/// signing. Separating the two lets configuration carry identities around
/// without holding key material live.
pub trait Identity: Send + Sync {
    /// Returns a stable identifier for this identity.
    fn identifier(&self) -> &str;

    /// Produce a signer for this identity.
    fn signer(&self) -> Result<Box<dyn Signer>, Error>;
}

/// An [`Identity`] holding its secret in memory.
///
/// # Warning
///
/// This implementation is insecure and should only be used for examples
/// and testing.
#[derive(Clone)]
pub struct MemoryIdentity {
    identifier: String,
    secret: Bytes,
}

impl MemoryIdentity {
    /// Create an identity from an identifier and a secret.
    pub fn new(identifier: impl Into<String>, secret: impl Into<Bytes>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl Identity for MemoryIdentity {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn signer(&self) -> Result<Box<dyn Signer>, Error> {
        Ok(Box::new(MemorySigner::new(self.secret.clone())))
    }
}

/// The record locating a keystore credential: a file name and the password
/// protecting it.
///
/// This crate does not open or parse keystore containers; integrations that
/// do so implement [`Identity`] themselves and consume this record.
#[derive(Clone, PartialEq, Eq)]
pub struct FileIdentity {
    file_name: String,
    password: String,
}

impl FileIdentity {
    /// Create a credential record from a keystore file name and password.
    pub fn new(file_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            password: password.into(),
        }
    }

    /// Returns the keystore file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the keystore password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// The password stays out of both renderings.
impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileIdentity {}", self.file_name)
    }
}

impl fmt::Debug for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileIdentity")
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DigestAlgorithm;
    use groundwork_memory::Buffer;
    use sha2::{Digest, Sha256};

    #[test]
    fn test_memory_identity_produces_working_signer() {
        let identity = MemoryIdentity::new("test", &b"secret"[..]);
        assert_eq!(identity.identifier(), "test");

        let signer = identity.signer().unwrap();
        assert_eq!(signer.digest_algorithm(), DigestAlgorithm::Sha256);

        let digest = Buffer::wrap(Sha256::digest(b"message").to_vec());
        let signature = signer.sign_digest(&digest).unwrap();
        assert!(!signature.as_bytes().is_empty());
    }

    #[test]
    fn test_memory_identity_signers_agree() {
        // Every signer produced by one identity signs identically.
        let identity = MemoryIdentity::new("test", &b"secret"[..]);
        let digest = Buffer::wrap(Sha256::digest(b"message").to_vec());

        let x = identity.signer().unwrap().sign_digest(&digest).unwrap();
        let y = identity.signer().unwrap().sign_digest(&digest).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn test_file_identity_accessors() {
        let identity = FileIdentity::new("keystore.p12", "hunter2");
        assert_eq!(identity.file_name(), "keystore.p12");
        assert_eq!(identity.password(), "hunter2");
    }

    #[test]
    fn test_file_identity_equality() {
        let x = FileIdentity::new("keystore.p12", "hunter2");
        let y = FileIdentity::new("keystore.p12", "hunter2");
        let different_file = FileIdentity::new("other.p12", "hunter2");
        let different_password = FileIdentity::new("keystore.p12", "other");

        assert_eq!(x, y);
        assert_ne!(x, different_file);
        assert_ne!(x, different_password);
    }

    #[test]
    fn test_file_identity_display_hides_password() {
        let identity = FileIdentity::new("keystore.p12", "hunter2");
        let rendered = identity.to_string();
        assert!(rendered.contains("keystore.p12"));
        assert!(!rendered.contains("hunter2"));
        assert!(!format!("{identity:?}").contains("hunter2"));
    }
}
