//! Tilepack Core - Foundational types for the tilepack asset decoder
//!
//! This crate provides the types shared by the decoder library and the CLI:
//! - `TilepackError` - Error taxonomy for manifest lookup, parsing, decoding and I/O
//! - `ContentHash` - SHA-256 hash of decoded asset bytes

mod error;
mod hash;

pub use error::{Result, TilepackError};
pub use hash::ContentHash;
