//! PNG verification of manifest payloads
//!
//! Decoding never inspects image structure. Verification decodes each payload
//! in memory and checks that it is actually a PNG, without touching the
//! output tree.

use crate::manifest::Manifest;
use crate::types::AssetEntry;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Status of a single payload check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Verification result for one manifest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCheck {
    pub category: String,
    pub name: String,
    pub index: usize,
    pub status: CheckStatus,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

/// Verification results for a whole manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyReport {
    pub checks: Vec<VerifyCheck>,
}

impl VerifyReport {
    /// Count checks by status
    pub fn count_by_status(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    /// True when no check failed (warnings are allowed)
    pub fn passed(&self) -> bool {
        self.count_by_status(CheckStatus::Fail) == 0
    }

    /// Print a formatted summary
    pub fn print_summary(&self) {
        for check in &self.checks {
            let icon = match check.status {
                CheckStatus::Pass => "OK",
                CheckStatus::Warn => "WARN",
                CheckStatus::Fail => "FAIL",
            };
            println!(
                "  {}/{}#{}: {}  {}",
                check.category, check.name, check.index, check.detail, icon
            );
        }
        if self.passed() {
            println!("  Result: PASSED ({} payloads)", self.checks.len());
        } else {
            println!(
                "  Result: FAILED ({} issues)",
                self.count_by_status(CheckStatus::Fail)
            );
        }
    }
}

/// Check every payload in the manifest
pub fn verify_manifest(manifest: &Manifest) -> VerifyReport {
    VerifyReport {
        checks: manifest.entries().map(|entry| check_entry(&entry)).collect(),
    }
}

fn check_entry(entry: &AssetEntry<'_>) -> VerifyCheck {
    let (status, detail, dimensions) = match entry.decode() {
        Err(e) => (CheckStatus::Fail, e.to_string(), None),
        Ok(bytes) => inspect_image(&bytes),
    };

    if status != CheckStatus::Pass {
        tracing::warn!(
            category = entry.category,
            name = entry.name,
            index = entry.index,
            %detail,
            "payload failed verification"
        );
    }

    VerifyCheck {
        category: entry.category.to_string(),
        name: entry.name.to_string(),
        index: entry.index,
        status,
        detail,
        dimensions,
    }
}

fn inspect_image(bytes: &[u8]) -> (CheckStatus, String, Option<(u32, u32)>) {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => match image::load_from_memory_with_format(bytes, ImageFormat::Png) {
            Ok(img) => (
                CheckStatus::Pass,
                format!("png {}x{}", img.width(), img.height()),
                Some((img.width(), img.height())),
            ),
            Err(e) => (CheckStatus::Fail, format!("corrupt png: {}", e), None),
        },
        Ok(other) => (
            CheckStatus::Warn,
            format!("{:?} image, not png", other).to_lowercase(),
            None,
        ),
        Err(_) => (
            CheckStatus::Fail,
            format!("not an image ({} bytes)", bytes.len()),
            None,
        ),
    }
}
