//! `[frame]` section configuration.
//!
//! Frame pages place the CSS, SMIL and script renditions of one document
//! side by side, each loaded from a sibling directory.
//!
//! # Example
//!
//! ```toml
//! [frame]
//! width = "25%"
//! css_dir = "css"
//! smil_dir = "smil"
//! script_dir = "wa"
//! ```

use serde::{Deserialize, Serialize};

/// Comparison page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// CSS width of each iframe.
    pub width: String,
    pub css_dir: String,
    pub smil_dir: String,
    pub script_dir: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: "25%".to_string(),
            css_dir: "css".to_string(),
            smil_dir: "smil".to_string(),
            script_dir: "wa".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_frame_config() {
        let config = test_parse_config("[frame]\nwidth = \"30em\"\nscript_dir = \"js\"");
        assert_eq!(config.frame.width, "30em");
        assert_eq!(config.frame.script_dir, "js");
        assert_eq!(config.frame.css_dir, "css");
        assert_eq!(config.frame.smil_dir, "smil");
    }
}
