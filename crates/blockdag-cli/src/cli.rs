use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use blockdag_merkle::HashAlgorithm;
use blockdag_sign::SignerConfig;

#[derive(Parser)]
#[command(
    name = "blockdag",
    about = "BlockDAG — structural signatures for directed acyclic graphs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign a graph file and print its signature set
    Sign(SignArgs),
    /// Compare two saved signature sets (`sign --format json` output)
    Compare(CompareArgs),
    /// Sign two graph files with the same settings and compare them
    Diff(DiffArgs),
}

/// Settings shared by every command that signs.
#[derive(Args, Debug)]
pub struct SignerArgs {
    /// Comma-separated attribute keys to hash (default: all)
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,
    /// Hash function: sha256 or blake3
    #[arg(long)]
    pub hash: Option<HashAlgorithm>,
    /// TOML signer configuration; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SignerArgs {
    /// Merge the configuration file (if any) with command-line overrides.
    pub fn resolve(&self) -> anyhow::Result<SignerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                SignerConfig::from_toml_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SignerConfig::default(),
        };
        if let Some(fields) = &self.fields {
            config = config.with_fields(fields.iter().cloned());
        }
        if let Some(hash) = self.hash {
            config = config.with_hash(hash);
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Graph file: {"vertices": {...}, "edges": [[src, dst], ...]}
    pub graph: PathBuf,
    #[command(flatten)]
    pub signer: SignerArgs,
    /// Merge signature records into the vertices; JSON output then holds
    /// both the graph and the signature set
    #[arg(long)]
    pub append: bool,
}

impl SignArgs {
    /// Signer settings, with `--append` enabling append mode when given.
    ///
    /// Without the flag, the config file's `append` value is kept.
    pub fn resolve(&self) -> anyhow::Result<SignerConfig> {
        let config = self.signer.resolve()?;
        Ok(if self.append {
            config.with_append(true)
        } else {
            config
        })
    }
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    pub left: PathBuf,
    pub right: PathBuf,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    #[command(flatten)]
    pub signer: SignerArgs,
}
