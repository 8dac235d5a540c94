//! Asset entry and report types

use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tilepack_core::{ContentHash, Result, TilepackError};

/// Standard alphabet with required padding. Non-zero trailing bits in the
/// final quantum are accepted, which keeps payloads from lenient encoders valid.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// What happens to already-written files when an entry fails to decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Decode and write entries one at a time; stop at the first bad entry.
    /// Files written before the failure stay on disk.
    #[default]
    FailFast,
    /// Decode every entry in memory first; nothing is written unless all succeed.
    ValidateFirst,
}

/// One base64 payload from the manifest, with its position in its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetEntry<'a> {
    pub category: &'a str,
    pub name: &'a str,
    /// 1-based position within the asset's sequence
    pub index: usize,
    /// Length of the asset's sequence
    pub count: usize,
    pub payload: &'a str,
}

impl<'a> AssetEntry<'a> {
    /// Output file name: `name.png` for a single payload, `name_<idx>.png` otherwise
    pub fn file_name(&self) -> String {
        if self.count == 1 {
            format!("{}.png", self.name)
        } else {
            format!("{}_{}.png", self.name, self.index)
        }
    }

    /// Directory the entry is written into
    pub fn target_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(self.category).join(self.name)
    }

    /// Full output path under `output_root`
    pub fn target_path(&self, output_root: &Path) -> PathBuf {
        self.target_dir(output_root).join(self.file_name())
    }

    /// Decode the payload as standard base64.
    ///
    /// ASCII whitespace (line wrapping) is ignored; everything else must be
    /// in the standard alphabet with correct padding.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let compact: Cow<'_, str> = if self.payload.bytes().any(|b| b.is_ascii_whitespace()) {
            Cow::Owned(
                self.payload
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect(),
            )
        } else {
            Cow::Borrowed(self.payload)
        };

        PAYLOAD_ENGINE
            .decode(compact.as_bytes())
            .map_err(|e| TilepackError::Decode {
                category: self.category.to_string(),
                name: self.name.to_string(),
                index: self.index,
                message: e.to_string(),
            })
    }
}

/// A file produced by a decode run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenAsset {
    pub category: String,
    pub name: String,
    pub index: usize,
    pub path: PathBuf,
    pub bytes: usize,
    pub hash: ContentHash,
}

/// Result of a successful decode run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    pub manifest_path: PathBuf,
    pub output_root: PathBuf,
    pub assets: Vec<WrittenAsset>,
}

impl DecodeReport {
    /// Total decoded bytes written
    pub fn total_bytes(&self) -> usize {
        self.assets.iter().map(|a| a.bytes).sum()
    }
}

/// Target of an entry, computed without decoding or writing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedAsset {
    pub category: String,
    pub name: String,
    pub index: usize,
    pub path: PathBuf,
    /// Length of the base64 text
    pub encoded_len: usize,
}
