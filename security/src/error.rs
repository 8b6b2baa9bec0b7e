//! Error types for security operations.

use crate::DigestAlgorithm;
use thiserror::Error;

/// Error type for security operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unknown container encoding '{0}'")]
    UnknownEncoding(String),
    #[error("unknown signing algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error("unknown digest algorithm '{0}'")]
    UnknownDigest(String),
    #[error("digest is {got} bytes, expected {expected} for {algorithm}")]
    DigestLength {
        algorithm: DigestAlgorithm,
        expected: usize,
        got: usize,
    },
    #[error("keystore '{0}' cannot be opened by this crate")]
    Keystore(String),
}
