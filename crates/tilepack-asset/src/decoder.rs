//! Manifest decoding into the output tree

use crate::config::DecoderConfig;
use crate::manifest::{validate_key, Manifest};
use crate::resolver::resolve_first_existing;
use crate::types::{AssetEntry, DecodePolicy, DecodeReport, WrittenAsset};
use crate::verify::{verify_manifest, VerifyReport};
use std::fs;
use std::path::{Path, PathBuf};
use tilepack_core::{ContentHash, Result, TilepackError};

/// Locates a manifest and materializes its payloads as files
///
/// Output layout: `<output_dir>/<category>/<name>/<name>[_<idx>].png`
pub struct AssetDecoder {
    config: DecoderConfig,
}

impl AssetDecoder {
    /// Create a decoder with the given configuration
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Resolve the manifest path from the configured candidates
    pub fn locate_manifest(&self) -> Result<PathBuf> {
        resolve_first_existing(&self.config.manifest_candidates)
    }

    /// Resolve and parse the manifest
    pub fn load_manifest(&self) -> Result<(PathBuf, Manifest)> {
        let path = self.locate_manifest()?;
        tracing::info!(path = %path.display(), "loading manifest");
        let manifest = Manifest::load(&path)?;
        tracing::debug!(
            categories = manifest.category_count(),
            entries = manifest.entry_count(),
            "manifest parsed"
        );
        Ok((path, manifest))
    }

    /// Decode every manifest entry and write it under the output directory
    pub fn decode_assets(&self) -> Result<DecodeReport> {
        let (manifest_path, manifest) = self.load_manifest()?;
        let assets = self.write_manifest(&manifest)?;

        tracing::info!(
            files = assets.len(),
            output = %self.config.output_dir.display(),
            "decode complete"
        );

        Ok(DecodeReport {
            manifest_path,
            output_root: self.config.output_dir.clone(),
            assets,
        })
    }

    /// Write an already-loaded manifest according to the configured policy
    pub fn write_manifest(&self, manifest: &Manifest) -> Result<Vec<WrittenAsset>> {
        let root = &self.config.output_dir;

        match self.config.policy {
            DecodePolicy::FailFast => manifest
                .entries()
                .map(|entry| {
                    let bytes = decode_entry(&entry)?;
                    write_asset(root, &entry, &bytes)
                })
                .collect(),
            DecodePolicy::ValidateFirst => {
                let decoded = manifest
                    .entries()
                    .map(|entry| decode_entry(&entry).map(|bytes| (entry, bytes)))
                    .collect::<Result<Vec<_>>>()?;

                decoded
                    .iter()
                    .map(|(entry, bytes)| write_asset(root, entry, bytes))
                    .collect()
            }
        }
    }

    /// Decode every entry in memory and check that it is a PNG image
    pub fn verify(&self) -> Result<(PathBuf, VerifyReport)> {
        let (path, manifest) = self.load_manifest()?;
        Ok((path, verify_manifest(&manifest)))
    }
}

fn decode_entry(entry: &AssetEntry<'_>) -> Result<Vec<u8>> {
    validate_key(entry.category)?;
    validate_key(entry.name)?;
    entry.decode()
}

fn write_asset(root: &Path, entry: &AssetEntry<'_>, bytes: &[u8]) -> Result<WrittenAsset> {
    let dir = entry.target_dir(root);
    fs::create_dir_all(&dir).map_err(|e| TilepackError::io(&dir, e))?;

    let path = dir.join(entry.file_name());
    fs::write(&path, bytes).map_err(|e| TilepackError::io(&path, e))?;

    tracing::debug!(
        category = entry.category,
        name = entry.name,
        index = entry.index,
        bytes = bytes.len(),
        path = %path.display(),
        "wrote asset"
    );

    Ok(WrittenAsset {
        category: entry.category.to_string(),
        name: entry.name.to_string(),
        index: entry.index,
        path,
        bytes: bytes.len(),
        hash: ContentHash::from_bytes(bytes),
    })
}
