//! Encodings for key and certificate containers.

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// The encoding of a key or certificate container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerEncoding {
    Pem,
    Der,
    Pkcs12,
}

impl fmt::Display for ContainerEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pem => "PEM",
            Self::Der => "DER",
            Self::Pkcs12 => "PKCS12",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ContainerEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PEM" => Ok(Self::Pem),
            "DER" => Ok(Self::Der),
            "PKCS12" => Ok(Self::Pkcs12),
            other => Err(Error::UnknownEncoding(other.to_string())),
        }
    }
}
