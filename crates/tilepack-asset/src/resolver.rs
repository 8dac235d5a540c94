//! Manifest path resolution

use std::path::{Path, PathBuf};
use tilepack_core::{Result, TilepackError};

/// File name of the asset manifest
pub const MANIFEST_FILE_NAME: &str = "assets_data.json";

/// Sibling directory holding the manifest when it is kept out of the base tree
pub const FALLBACK_DIR: &str = "generated_assets";

/// Default candidate list for a base directory, in precedence order:
/// 1. `<base>/assets_data.json`
/// 2. `<base>/../generated_assets/assets_data.json`
pub fn default_candidates(base_dir: &Path) -> Vec<PathBuf> {
    vec![
        base_dir.join(MANIFEST_FILE_NAME),
        base_dir.join("..").join(FALLBACK_DIR).join(MANIFEST_FILE_NAME),
    ]
}

/// Return the first candidate that exists as a file.
///
/// Candidates are tried strictly in order; later candidates are never read
/// once an earlier one matches.
pub fn resolve_first_existing(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "manifest candidate found");
            return Ok(candidate.clone());
        }
        tracing::debug!(path = %candidate.display(), "manifest candidate missing");
    }

    Err(TilepackError::ManifestNotFound {
        candidates: candidates.to_vec(),
    })
}
