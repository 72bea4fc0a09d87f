//! Configuration management for `smil.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── batch      # [batch]
//! │   ├── frame      # [frame]
//! │   └── translate  # [translate]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Global config handle
//! └── mod.rs         # SmilConfig (this file)
//! ```
//!
//! The file is optional: without one every section uses its defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BatchConfig, FrameConfig, TranslateConfig};
pub use types::{ConfigError, cfg, init_config};

use crate::{
    debug, log,
    smil::{OutputMode, TranslateOptions},
};
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::Path,
    sync::LazyLock,
};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "smil.toml";

/// Valid CSS identifier start for generated animation names.
static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("prefix pattern is valid"));

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing smil.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmilConfig {
    /// Translation settings
    pub translate: TranslateConfig,

    /// Directory batch settings
    pub batch: BatchConfig,

    /// Frame page settings
    pub frame: FrameConfig,
}

impl SmilConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `smil.toml` is searched
    /// upward from the current directory and defaults are used when none
    /// is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let path = match explicit {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(ConfigError::Io(
                        path,
                        std::io::Error::from(std::io::ErrorKind::NotFound),
                    )
                    .into());
                }
                path
            }
            None => match find_config_file(&cwd, Path::new(DEFAULT_CONFIG_NAME)) {
                Some(path) => path,
                None => {
                    debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_NAME);
                    return Ok(Self::default());
                }
            },
        };

        let config = Self::from_path(&path)?;
        config.validate()?;
        debug!("config"; "loaded {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Check values serde cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.translate.animation_prefix;
        if !PREFIX_RE.is_match(prefix) {
            return Err(ConfigError::Validation(format!(
                "[translate] animation_prefix `{prefix}` is not a valid CSS identifier"
            )));
        }

        if self.batch.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "[batch] extensions must not be empty".to_string(),
            ));
        }
        if self.batch.extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "[batch] extensions must not contain empty entries".to_string(),
            ));
        }

        if self.frame.width.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[frame] width must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Per-document translation settings for `mode`.
    pub fn translate_options(&self, mode: OutputMode) -> TranslateOptions {
        TranslateOptions {
            mode,
            animation_prefix: self.translate.animation_prefix.clone(),
            length_properties: self.translate.length_properties.clone(),
        }
    }
}

/// Parse a config snippet, panicking on invalid TOML.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SmilConfig {
    SmilConfig::from_str(content).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = SmilConfig::default();
        assert!(config.validate().is_ok());

        let options = config.translate_options(OutputMode::Script);
        assert_eq!(options.mode, OutputMode::Script);
        assert_eq!(options.animation_prefix, "anim");
    }

    #[test]
    fn test_invalid_prefix() {
        for prefix in ["", "1anim", "a b", "x.y"] {
            let config =
                test_parse_config(&format!("[translate]\nanimation_prefix = \"{prefix}\""));
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{prefix}"
            );
        }
        let config = test_parse_config("[translate]\nanimation_prefix = \"_a-1\"");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_extensions() {
        let config = test_parse_config("[batch]\nextensions = []");
        assert!(config.validate().is_err());
        let config = test_parse_config("[batch]\nextensions = [\"svg\", \" \"]");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (config, ignored) = SmilConfig::parse_with_ignored(
            "[translate]\nanimation_prefix = \"a\"\nspeed = 2\n\n[extra]\nx = 1",
        )
        .unwrap();
        assert_eq!(config.translate.animation_prefix, "a");
        assert_eq!(ignored, vec!["translate.speed", "extra"]);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(SmilConfig::from_str("[translate\n").is_err());
        assert!(SmilConfig::from_str("[batch]\nrecursive = \"yes\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[frame]\nwidth = \"50%\"").unwrap();

        let config = SmilConfig::load(Some(&path)).unwrap();
        assert_eq!(config.frame.width, "50%");

        assert!(SmilConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[translate]\nanimation_prefix = \"9\"").unwrap();

        let err = SmilConfig::load(Some(&path)).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}
