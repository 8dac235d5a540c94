//! Asset manifest: category -> asset name -> base64 payloads

use crate::types::{AssetEntry, PlannedAsset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tilepack_core::{Result, TilepackError};

/// Parsed manifest.
///
/// ```json
/// { "fx": { "explosion": ["<base64>", "<base64>"] } }
/// ```
///
/// Sorted maps give a stable iteration order; the set of output files does
/// not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    categories: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and parse a manifest file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| TilepackError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| TilepackError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Add (or replace) the payload list for an asset
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        payloads: Vec<String>,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(name.into(), payloads);
    }

    /// Payloads for one asset
    pub fn get(&self, category: &str, name: &str) -> Option<&[String]> {
        self.categories
            .get(category)
            .and_then(|assets| assets.get(name))
            .map(|v| v.as_slice())
    }

    /// Category names
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(|s| s.as_str())
    }

    /// Every payload in the manifest, in iteration order
    pub fn entries(&self) -> impl Iterator<Item = AssetEntry<'_>> {
        self.categories.iter().flat_map(|(category, assets)| {
            assets.iter().flat_map(move |(name, payloads)| {
                let count = payloads.len();
                payloads
                    .iter()
                    .enumerate()
                    .map(move |(i, payload)| AssetEntry {
                        category: category.as_str(),
                        name: name.as_str(),
                        index: i + 1,
                        count,
                        payload: payload.as_str(),
                    })
            })
        })
    }

    /// Number of payloads across all assets
    pub fn entry_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|assets| assets.values())
            .map(|payloads| payloads.len())
            .sum()
    }

    /// Number of categories
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Check if the manifest has no payloads at all
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

/// Check that a category or asset name is a single plain path component
pub fn validate_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        Some("must not be empty")
    } else if key == "." || key == ".." {
        Some("must not be a relative path component")
    } else if key.contains(['/', '\\']) {
        Some("must not contain a path separator")
    } else if key.contains('\0') {
        Some("must not contain a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(TilepackError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Compute every output path without decoding or writing anything
pub fn plan(manifest: &Manifest, output_root: &Path) -> Result<Vec<PlannedAsset>> {
    manifest
        .entries()
        .map(|entry| {
            validate_key(entry.category)?;
            validate_key(entry.name)?;
            Ok(PlannedAsset {
                category: entry.category.to_string(),
                name: entry.name.to_string(),
                index: entry.index,
                path: entry.target_path(output_root),
                encoded_len: entry.payload.len(),
            })
        })
        .collect()
}
