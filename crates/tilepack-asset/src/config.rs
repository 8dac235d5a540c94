//! Layered decoder configuration
//!
//! Settings are resolved with four layers of precedence (highest wins):
//! 1. Explicit overrides (CLI flags)
//! 2. Environment variables: `TILEPACK_BASE_DIR`, `TILEPACK_OUTPUT_DIR`
//! 3. `tilepack.toml` in the base directory
//! 4. Defaults derived from the base directory

use crate::resolver::default_candidates;
use crate::types::DecodePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tilepack_core::{Result, TilepackError};

/// Name of the optional config file looked up in the base directory
pub const CONFIG_FILE_NAME: &str = "tilepack.toml";

const ENV_BASE_DIR: &str = "TILEPACK_BASE_DIR";
const ENV_OUTPUT_DIR: &str = "TILEPACK_OUTPUT_DIR";
const DEFAULT_OUTPUT_DIR: &str = "assets";

/// `[decode]` table of `tilepack.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeSection {
    #[serde(default)]
    pub manifests: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub policy: Option<DecodePolicy>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub decode: DecodeSection,
}

/// Values supplied directly by the caller; they win over every other layer
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_dir: Option<PathBuf>,
    /// Replaces the candidate list when non-empty
    pub manifests: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub policy: Option<DecodePolicy>,
}

/// Resolved decoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Base for every relative default
    pub base_dir: PathBuf,
    /// Manifest locations, tried in order
    pub manifest_candidates: Vec<PathBuf>,
    /// Root of the `<category>/<name>/` tree
    pub output_dir: PathBuf,
    pub policy: DecodePolicy,
}

impl DecoderConfig {
    /// Defaults for an explicit base directory, with no file or env layers
    pub fn for_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        Self {
            manifest_candidates: default_candidates(&base_dir),
            output_dir: base_dir.join(DEFAULT_OUTPUT_DIR),
            policy: DecodePolicy::default(),
            base_dir,
        }
    }

    /// Load config with layered precedence: defaults < file < env < overrides
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        Self::load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`DecoderConfig::load`] with a custom environment lookup
    pub fn load_with_env<F>(overrides: ConfigOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = match overrides.base_dir.clone() {
            Some(dir) => dir,
            None => match env(ENV_BASE_DIR).filter(|v| !v.is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => install_dir()?,
            },
        };

        let mut config = Self::for_base_dir(&base_dir);

        let config_path = base_dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            let file = Self::load_file(&config_path)?;
            config.apply_file(file)?;
            tracing::debug!(path = %config_path.display(), "applied config file");
        }

        if let Some(output) = env(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            config.output_dir = PathBuf::from(output);
        }

        config.apply_overrides(overrides);
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path).map_err(|e| TilepackError::io(path, e))?;
        toml::from_str(&content).map_err(|e| {
            TilepackError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Merge a config file; relative paths resolve against the base directory
    fn apply_file(&mut self, file: ConfigFile) -> Result<()> {
        let section = file.decode;

        if let Some(manifests) = section.manifests {
            if manifests.is_empty() {
                return Err(TilepackError::Config(
                    "decode.manifests must list at least one path".to_string(),
                ));
            }
            self.manifest_candidates = manifests
                .into_iter()
                .map(|p| self.base_dir.join(p))
                .collect();
        }
        if let Some(output) = section.output {
            self.output_dir = self.base_dir.join(output);
        }
        if let Some(policy) = section.policy {
            self.policy = policy;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if !overrides.manifests.is_empty() {
            self.manifest_candidates = overrides.manifests;
        }
        if let Some(output) = overrides.output {
            self.output_dir = output;
        }
        if let Some(policy) = overrides.policy {
            self.policy = policy;
        }
    }
}

/// Directory containing the running executable
fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        TilepackError::Config(format!(
            "Cannot determine install directory of {}",
            exe.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_dir;
    use std::collections::HashMap;
    use std::fs;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn overrides_for(dir: &Path) -> ConfigOverrides {
        ConfigOverrides {
            base_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_for_base_dir() {
        let config = DecoderConfig::for_base_dir("/opt/game/game_assets");
        assert_eq!(config.output_dir, Path::new("/opt/game/game_assets/assets"));
        assert_eq!(config.manifest_candidates.len(), 2);
        assert_eq!(config.policy, DecodePolicy::FailFast);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = temp_dir();
        let config = DecoderConfig::load_with_env(overrides_for(&dir), no_env).unwrap();
        assert_eq!(config, DecoderConfig::for_base_dir(&dir));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_layer() {
        let dir = temp_dir();
        fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"
[decode]
manifests = ["data/assets.json"]
output = "sprites"
policy = "validate_first"
"#,
        )
        .unwrap();

        let config = DecoderConfig::load_with_env(overrides_for(&dir), no_env).unwrap();
        assert_eq!(config.manifest_candidates, vec![dir.join("data/assets.json")]);
        assert_eq!(config.output_dir, dir.join("sprites"));
        assert_eq!(config.policy, DecodePolicy::ValidateFirst);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_env_beats_file_and_overrides_beat_env() {
        let dir = temp_dir();
        fs::write(dir.join(CONFIG_FILE_NAME), "[decode]\noutput = \"from_file\"\n").unwrap();

        let env: HashMap<&str, String> =
            [(ENV_OUTPUT_DIR, "/env/out".to_string())].into_iter().collect();
        let lookup = |key: &str| env.get(key).cloned();

        let config = DecoderConfig::load_with_env(overrides_for(&dir), lookup).unwrap();
        assert_eq!(config.output_dir, Path::new("/env/out"));

        let mut overrides = overrides_for(&dir);
        overrides.output = Some(PathBuf::from("/cli/out"));
        overrides.manifests = vec![PathBuf::from("/cli/manifest.json")];
        let config = DecoderConfig::load_with_env(overrides, lookup).unwrap();
        assert_eq!(config.output_dir, Path::new("/cli/out"));
        assert_eq!(config.manifest_candidates, vec![PathBuf::from("/cli/manifest.json")]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_base_dir_from_env() {
        let dir = temp_dir();
        let dir_str = dir.to_string_lossy().to_string();
        let lookup = |key: &str| (key == ENV_BASE_DIR).then(|| dir_str.clone());

        let config = DecoderConfig::load_with_env(ConfigOverrides::default(), lookup).unwrap();
        assert_eq!(config.base_dir, dir);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_manifest_list_rejected() {
        let dir = temp_dir();
        fs::write(dir.join(CONFIG_FILE_NAME), "[decode]\nmanifests = []\n").unwrap();

        let err = DecoderConfig::load_with_env(overrides_for(&dir), no_env).unwrap_err();
        assert!(matches!(err, TilepackError::Config(_)));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = temp_dir();
        fs::write(dir.join(CONFIG_FILE_NAME), "[decode]\nunknown_key = 1\n").unwrap();

        let err = DecoderConfig::load_with_env(overrides_for(&dir), no_env).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));

        fs::remove_dir_all(&dir).ok();
    }
}
