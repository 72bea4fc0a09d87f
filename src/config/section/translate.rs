//! `[translate]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [translate]
//! animation_prefix = "anim"   # Prefix for generated animation names
//! length_properties = ["font-size", "letter-spacing", "word-spacing"]
//! ```

use serde::{Deserialize, Serialize};

use crate::smil::{DEFAULT_ANIMATION_PREFIX, DEFAULT_LENGTH_PROPERTIES};

/// Translation settings shared by every document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Prefix for generated animation names (`anim0`, `anim1`, ...).
    pub animation_prefix: String,

    /// Properties whose unitless values get a `px` suffix.
    pub length_properties: Vec<String>,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            animation_prefix: DEFAULT_ANIMATION_PREFIX.to_string(),
            length_properties: DEFAULT_LENGTH_PROPERTIES.map(String::from).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_translate_config() {
        let config = test_parse_config(
            "[translate]\nanimation_prefix = \"smil_\"\nlength_properties = [\"stroke-width\"]",
        );
        assert_eq!(config.translate.animation_prefix, "smil_");
        assert_eq!(config.translate.length_properties, vec!["stroke-width"]);
    }

    #[test]
    fn test_translate_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.translate.animation_prefix, "anim");
        assert_eq!(config.translate.length_properties.len(), 3);
        assert!(config.translate.length_properties.iter().any(|p| p == "font-size"));
    }
}
