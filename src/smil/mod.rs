//! SMIL animation translation.
//!
//! # Pipeline
//!
//! ```text
//! Document ──► element::collect_animation_nodes
//!                  │  (document order)
//!                  ▼
//!              AnimationElement::read ──► model::build_model ──► emit::{css, script}
//!                                              │                      │
//!                                        ids, clock, transform   style / script text
//!                                                                     │
//!                                                          driver attaches containers
//! ```
//!
//! Any unsupported construct aborts the whole document with a
//! [`TranslateError`]; a partial translation is never produced.

pub mod clock;
pub mod driver;
pub mod element;
pub mod emit;
pub mod error;
pub mod ids;
pub mod model;
pub mod number;
pub mod transform;

pub use driver::{TranslateStats, translate_document};
pub use error::TranslateError;

/// Default prefix for generated animation names.
pub const DEFAULT_ANIMATION_PREFIX: &str = "anim";

/// Properties whose unitless values get a `px` suffix.
pub const DEFAULT_LENGTH_PROPERTIES: [&str; 3] = ["font-size", "letter-spacing", "word-spacing"];

/// Which artifact a document is translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `@keyframes` + `animation` rules in a `<style>` element.
    Css,
    /// Web Animations calls in a `<script>` element.
    Script,
}

impl OutputMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Script => "script",
        }
    }
}

/// Per-document translation settings.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub mode: OutputMode,
    pub animation_prefix: String,
    pub length_properties: Vec<String>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Css,
            animation_prefix: DEFAULT_ANIMATION_PREFIX.to_string(),
            length_properties: DEFAULT_LENGTH_PROPERTIES.map(String::from).to_vec(),
        }
    }
}

impl TranslateOptions {
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}
