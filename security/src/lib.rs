//! Signing abstractions: signers, key identifiers, and identities.
//!
//! This crate defines the seams the rest of the stack signs through — which
//! algorithm, which key, which credential source — without implementing any
//! cryptographic scheme itself. Integrations plug hardened implementations
//! into the [`Signer`] and [`Identity`] traits; the in-memory implementations
//! here exist for examples and testing.
//!
//! # Status
//!
//! `groundwork-security` is **ALPHA** software and is not yet recommended for
//! production use. Developers should expect breaking changes and occasional
//! instability.

mod encoding;
pub use encoding::ContainerEncoding;
mod error;
pub use error::Error;
mod identity;
pub use identity::{FileIdentity, Identity, MemoryIdentity};
mod key_id;
pub use key_id::KeyId;
mod signer;
pub use signer::{DigestAlgorithm, Key, MemorySigner, Signature, Signer, SigningAlgorithm};
