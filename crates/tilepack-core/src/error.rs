//! Error types for tilepack

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for tilepack operations
#[derive(Debug, Error)]
pub enum TilepackError {
    #[error("Could not find assets manifest; tried {}", display_paths(.candidates))]
    ManifestNotFound { candidates: Vec<PathBuf> },

    #[error("Failed to parse manifest {}: {message}", .path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("Invalid base64 in {category}/{name} entry #{index}: {message}")]
    Decode {
        category: String,
        name: String,
        index: usize,
        message: String,
    },

    #[error("Invalid manifest key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for tilepack operations
pub type Result<T> = std::result::Result<T, TilepackError>;

impl TilepackError {
    /// Attach a path to an I/O error
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TilepackError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<toml::de::Error> for TilepackError {
    fn from(err: toml::de::Error) -> Self {
        TilepackError::Config(err.to_string())
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidate paths".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
