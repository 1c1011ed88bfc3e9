//! Error types for metadata resolution

use crate::collector::ResolutionPhase;
use crate::hierarchy::{ElementKind, TargetElement};
use thiserror::Error;

/// Main error type for metainherit operations
///
/// Resolution itself only produces [`Error::UnsupportedElementKind`] and
/// [`Error::TargetPhaseMismatch`]. Both indicate a wiring mistake in the
/// caller and are propagated, never recovered from internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Resolution was requested for an element kind other than type or method
    #[error("Unsupported element kind '{0}': only type and method metadata can be resolved")]
    UnsupportedElementKind(ElementKind),

    /// The target element does not fit the resolution phase it was used in
    #[error("Target {target} cannot be resolved in phase {phase}")]
    TargetPhaseMismatch {
        target: Box<TargetElement>,
        phase: ResolutionPhase,
    },

    /// Missing or inconsistent collaborators and settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid type model (dangling references, cycles, wrong shapes)
    #[error("Model error: {0}")]
    Model(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn mismatch(target: &TargetElement, phase: ResolutionPhase) -> Self {
        Self::TargetPhaseMismatch {
            target: Box::new(target.clone()),
            phase,
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{MethodRef, MethodSignature};

    #[test]
    fn test_mismatch_message_names_target_and_phase() {
        let target = TargetElement::Method(MethodRef::new("A", MethodSignature::new("f", ["int"])));
        let err = Error::mismatch(&target, ResolutionPhase::FromClass);
        let message = err.to_string();
        assert!(message.contains("A.f(int)"), "{message}");
        assert!(message.contains("FROM_CLASS"), "{message}");
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::Configuration("no interceptor".into()));
        let err = result.context("building advisor").unwrap_err();
        assert_eq!(
            err.to_string(),
            "building advisor: Configuration error: no interceptor"
        );
    }
}
