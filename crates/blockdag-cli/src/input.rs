//! Graph and signature-set files.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use blockdag_sign::SignatureSet;
use blockdag_types::Attributes;

/// A graph as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphFile {
    #[serde(default)]
    pub vertices: BTreeMap<String, Attributes>,
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

impl GraphFile {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading graph {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing graph {}", path.display()))
    }
}

/// Load a signature set written by `blockdag sign --format json`.
pub fn load_signatures(path: &Path) -> anyhow::Result<SignatureSet<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading signatures {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing signatures {}", path.display()))
}
