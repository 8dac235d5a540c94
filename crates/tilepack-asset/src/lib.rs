//! Tilepack Asset - Manifest-driven asset decoding
//!
//! This crate locates a JSON manifest of base64-encoded images, decodes every
//! entry and writes it to `<output>/<category>/<name>/<name>[_<idx>].png`.

mod config;
mod decoder;
mod manifest;
mod resolver;
mod types;
mod verify;

#[cfg(test)]
mod test_support;

pub use config::{ConfigOverrides, DecoderConfig, CONFIG_FILE_NAME};
pub use decoder::AssetDecoder;
pub use manifest::{plan, validate_key, Manifest};
pub use resolver::{default_candidates, resolve_first_existing, FALLBACK_DIR, MANIFEST_FILE_NAME};
pub use types::{AssetEntry, DecodePolicy, DecodeReport, PlannedAsset, WrittenAsset};
pub use verify::{verify_manifest, CheckStatus, VerifyCheck, VerifyReport};
