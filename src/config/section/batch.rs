//! `[batch]` section configuration.
//!
//! Controls which files a directory run picks up.
//!
//! # Example
//!
//! ```toml
//! [batch]
//! extensions = ["svg", "html"]   # Markup documents to translate
//! recursive = false              # Descend into subdirectories
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Directory batch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions treated as markup documents (case-insensitive).
    pub extensions: Vec<String>,

    /// Translate files in subdirectories too.
    pub recursive: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: ["svg", "xml", "xhtml", "html", "htm"]
                .map(String::from)
                .to_vec(),
            recursive: false,
        }
    }
}

impl BatchConfig {
    /// Check whether a file should be part of a batch.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}
