use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use blockdag_merkle::HashAlgorithm;

use crate::error::{SignError, SignResult};

/// Settings for a [`DagSigner`](crate::DagSigner) run.
///
/// Loadable from TOML:
///
/// ```toml
/// hash = "blake3"
/// data_fields = ["data"]
/// append = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignerConfig {
    /// Hash function used for every digest.
    pub hash: HashAlgorithm,
    /// Attribute keys that participate in hashing. `None` selects all.
    pub data_fields: Option<BTreeSet<String>>,
    /// Merge signature records back into the caller's vertex attributes.
    pub append: bool,
}

impl SignerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> SignResult<Self> {
        toml::from_str(s).map_err(|e| SignError::Config(e.to_string()))
    }

    /// Restrict hashing to the given attribute keys.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Use a different hash function.
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    /// Enable or disable append mode.
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }
}
