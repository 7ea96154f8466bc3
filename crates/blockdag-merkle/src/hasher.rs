use std::fmt;
use std::str::FromStr;

use blockdag_types::Digest;
use serde::{Deserialize, Deserializer, Serialize};
use sha2::Digest as _;

/// A one-way hash function from bytes to a [`Digest`].
///
/// Implemented for every `Fn(&[u8]) -> Digest`, so a closure can be handed
/// to the signer directly.
pub trait HashFunction {
    /// Hash raw bytes.
    fn hash(&self, data: &[u8]) -> Digest;
}

impl<F> HashFunction for F
where
    F: Fn(&[u8]) -> Digest,
{
    fn hash(&self, data: &[u8]) -> Digest {
        self(data)
    }
}

/// SHA-256. The default hash function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256;

impl HashFunction for Sha256 {
    fn hash(&self, data: &[u8]) -> Digest {
        Digest::new(sha2::Sha256::digest(data).to_vec())
    }
}

/// BLAKE3 with the default 32-byte output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3;

impl HashFunction for Blake3 {
    fn hash(&self, data: &[u8]) -> Digest {
        Digest::from(*blake3::hash(data).as_bytes())
    }
}

/// Built-in hash functions, selectable by name from configuration.
///
/// Names are parsed the same way from configuration files and the command
/// line; see the [`FromStr`] impl.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl HashAlgorithm {
    /// The configuration name of this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl HashFunction for HashAlgorithm {
    fn hash(&self, data: &[u8]) -> Digest {
        match self {
            Self::Sha256 => Sha256.hash(data),
            Self::Blake3 => Blake3.hash(data),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HasherError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for HashAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors from hash function selection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}
