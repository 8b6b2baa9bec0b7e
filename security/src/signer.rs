//! Produce signatures over digests through a pluggable signer seam.

use crate::{Error, KeyId};
use bytes::Bytes;
use groundwork_memory::Buffer;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// The algorithm a [`Signer`] signs with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SigningAlgorithm {
    Rsa,
    Dsa,
    Ecdsa,
    Hmac,
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Ecdsa => "ECDSA",
            Self::Hmac => "HMAC",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SigningAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RSA" => Ok(Self::Rsa),
            "DSA" => Ok(Self::Dsa),
            "ECDSA" => Ok(Self::Ecdsa),
            "HMAC" => Ok(Self::Hmac),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// The digest algorithm a [`Signer`] expects its input to be hashed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Returns the digest length in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA256" => Ok(Self::Sha256),
            "SHA512" => Ok(Self::Sha512),
            other => Err(Error::UnknownDigest(other.to_string())),
        }
    }
}

/// A public key: its identifier, the algorithm it verifies, and the key
/// material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    id: KeyId,
    algorithm: SigningAlgorithm,
    material: Bytes,
}

impl Key {
    /// Create a key from its parts.
    pub fn new(id: KeyId, algorithm: SigningAlgorithm, material: impl Into<Bytes>) -> Self {
        Self {
            id,
            algorithm,
            material: material.into(),
        }
    }

    /// Returns the key's identifier.
    pub fn key_id(&self) -> &KeyId {
        &self.id
    }

    /// Returns the algorithm this key verifies.
    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Returns the key material.
    pub fn material(&self) -> &[u8] {
        &self.material
    }
}

/// A signature over a digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    algorithm: SigningAlgorithm,
    bytes: Bytes,
}

impl Signature {
    /// Create a signature from the algorithm that produced it and its bytes.
    pub fn new(algorithm: SigningAlgorithm, bytes: impl Into<Bytes>) -> Self {
        Self {
            algorithm,
            bytes: bytes.into(),
        }
    }

    /// Returns the algorithm that produced this signature.
    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Returns the signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the signature, returning its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Produces [`Signature`]s over digests.
///
/// The trait is object-safe: consumers hold `Box<dyn Signer>` obtained from
/// an [`crate::Identity`] without knowing the scheme behind it.
pub trait Signer: Send + Sync {
    /// Returns the algorithm this signer signs with.
    fn signing_algorithm(&self) -> SigningAlgorithm;

    /// Returns the digest algorithm this signer expects.
    fn digest_algorithm(&self) -> DigestAlgorithm;

    /// Returns the identifier of the signing key.
    fn key_id(&self) -> KeyId;

    /// Returns the public key corresponding to the signing key.
    fn public_key(&self) -> Key;

    /// Sign a digest.
    ///
    /// The buffer's readable window must hold exactly one digest of
    /// [`Signer::digest_algorithm`]'s length; the window is not consumed.
    fn sign_digest(&self, digest: &Buffer) -> Result<Signature, Error>;
}

/// A deterministic in-memory [`Signer`].
///
/// # Warning
///
/// This implementation is insecure and should only be used for examples
/// and testing.
#[derive(Clone)]
pub struct MemorySigner {
    secret: Bytes,
}

impl MemorySigner {
    /// Create a signer from a secret.
    pub fn new(secret: impl Into<Bytes>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn public_material(&self) -> Bytes {
        let digest = Sha256::digest(&self.secret);
        Bytes::copy_from_slice(&digest)
    }
}

impl Signer for MemorySigner {
    fn signing_algorithm(&self) -> SigningAlgorithm {
        SigningAlgorithm::Hmac
    }

    fn digest_algorithm(&self) -> DigestAlgorithm {
        DigestAlgorithm::Sha256
    }

    fn key_id(&self) -> KeyId {
        KeyId::from_key_material(&self.public_material())
    }

    fn public_key(&self) -> Key {
        Key::new(
            self.key_id(),
            self.signing_algorithm(),
            self.public_material(),
        )
    }

    fn sign_digest(&self, digest: &Buffer) -> Result<Signature, Error> {
        let algorithm = self.digest_algorithm();
        if digest.remaining() != algorithm.size() {
            return Err(Error::DigestLength {
                algorithm,
                expected: algorithm.size(),
                got: digest.remaining(),
            });
        }

        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(digest.as_slice());
        Ok(Signature::new(
            self.signing_algorithm(),
            Bytes::copy_from_slice(&hasher.finalize()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_of(message: &[u8]) -> Buffer {
        Buffer::wrap(Sha256::digest(message).to_vec())
    }

    #[test]
    fn test_algorithm_round_trip() {
        for algorithm in [
            SigningAlgorithm::Rsa,
            SigningAlgorithm::Dsa,
            SigningAlgorithm::Ecdsa,
            SigningAlgorithm::Hmac,
        ] {
            let parsed: SigningAlgorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
        assert!("ED25519".parse::<SigningAlgorithm>().is_err());
    }

    #[test]
    fn test_digest_algorithm_lengths() {
        assert_eq!(DigestAlgorithm::Sha256.size(), 32);
        assert_eq!(DigestAlgorithm::Sha512.size(), 64);
        let parsed: DigestAlgorithm = "SHA512".parse().unwrap();
        assert_eq!(parsed, DigestAlgorithm::Sha512);
    }

    #[test]
    fn test_sign_digest_is_deterministic() {
        let signer = MemorySigner::new(&b"secret"[..]);

        let x = signer.sign_digest(&digest_of(b"message")).unwrap();
        let y = signer.sign_digest(&digest_of(b"message")).unwrap();
        let z = signer.sign_digest(&digest_of(b"other")).unwrap();

        assert_eq!(x, y);
        assert_ne!(x, z);
        assert_eq!(x.algorithm(), SigningAlgorithm::Hmac);
    }

    #[test]
    fn test_sign_digest_checks_length() {
        let signer = MemorySigner::new(&b"secret"[..]);
        let err = signer
            .sign_digest(&Buffer::wrap(vec![0; 16]))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DigestLength {
                algorithm: DigestAlgorithm::Sha256,
                expected: 32,
                got: 16,
            }
        );
    }

    #[test]
    fn test_signers_with_different_secrets_differ() {
        let x = MemorySigner::new(&b"one"[..]);
        let y = MemorySigner::new(&b"two"[..]);

        assert_ne!(x.key_id(), y.key_id());
        let digest = digest_of(b"message");
        assert_ne!(
            x.sign_digest(&digest).unwrap(),
            y.sign_digest(&digest).unwrap()
        );
    }

    #[test]
    fn test_public_key_carries_key_id() {
        let signer = MemorySigner::new(&b"secret"[..]);
        let key = signer.public_key();

        assert_eq!(key.key_id(), &signer.key_id());
        assert_eq!(key.algorithm(), SigningAlgorithm::Hmac);
        assert_eq!(key.material().len(), 32);
    }

    #[test]
    fn test_object_safety() {
        let signer: Box<dyn Signer> = Box::new(MemorySigner::new(&b"secret"[..]));
        assert_eq!(signer.digest_algorithm(), DigestAlgorithm::Sha256);
        assert!(signer.sign_digest(&digest_of(b"message")).is_ok());
    }
}
