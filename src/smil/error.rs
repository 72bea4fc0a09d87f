//! Translation error types.

use thiserror::Error;

/// Result alias for translation steps.
pub type Result<T, E = TranslateError> = std::result::Result<T, E>;

/// Reasons a document cannot be translated.
///
/// Both kinds abort the whole document; nothing is written for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("the SMIL feature \"{0}\" is not currently supported")]
    UnsupportedFeature(String),

    #[error("document has no <{0}> element to host generated content")]
    MissingStructuralElement(String),
}

impl TranslateError {
    /// Shorthand for `UnsupportedFeature`.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature(feature.into())
    }

    /// The unsupported feature description, if this is a feature rejection.
    #[cfg(test)]
    pub fn feature(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFeature(feature) => Some(feature),
            Self::MissingStructuralElement(_) => None,
        }
    }
}
