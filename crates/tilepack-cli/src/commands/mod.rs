//! CLI command implementations

pub mod decode;
pub mod list;
pub mod locate;
pub mod verify;

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tilepack_asset::{AssetDecoder, ConfigOverrides, DecodePolicy, DecoderConfig};

/// Flags shared by every command that touches the manifest
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// Base directory (defaults to the directory containing this executable)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Manifest path; repeat to give an ordered fallback list
    #[arg(long)]
    pub manifest: Vec<PathBuf>,

    /// Output directory (defaults to <base-dir>/assets)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl LocationArgs {
    pub fn into_overrides(self, policy: Option<DecodePolicy>) -> ConfigOverrides {
        ConfigOverrides {
            base_dir: self.base_dir,
            manifests: self.manifest,
            output: self.output,
            policy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Resolve layered config and build a decoder from it
pub fn build_decoder(location: LocationArgs, policy: Option<DecodePolicy>) -> Result<AssetDecoder> {
    let config = DecoderConfig::load(location.into_overrides(policy))?;
    tracing::debug!(
        base_dir = %config.base_dir.display(),
        output = %config.output_dir.display(),
        policy = ?config.policy,
        "resolved config"
    );
    Ok(AssetDecoder::new(config))
}
