use serde::{Deserialize, Serialize};

use super::inheritance::InheritanceConfiguration;

/// Root configuration structure, as read from `.metainherit.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MetaInheritConfig {
    /// Hierarchy edges to follow
    #[serde(default)]
    pub inheritance: InheritanceConfiguration,

    /// Interception settings
    #[serde(default)]
    pub interception: Option<InterceptionConfig>,
}

/// Restricts resolution to selected metadata kinds
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InterceptionConfig {
    /// Metadata kinds to collect; absent means all kinds
    #[serde(default)]
    pub metadata: Option<Vec<String>>,
}

impl MetaInheritConfig {
    pub fn intercepting_metadata(&self) -> Option<Vec<String>> {
        self.interception
            .as_ref()
            .and_then(|interception| interception.metadata.clone())
    }

    pub fn resolution_settings(&self) -> ResolutionSettings {
        ResolutionSettings {
            inheritance: self.inheritance,
            intercepting_metadata: self.intercepting_metadata(),
        }
    }
}

/// Everything a collector needs to know besides the hierarchy itself.
///
/// A collector holds exactly one settings value per cache generation;
/// changing it discards every cached result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSettings {
    pub inheritance: InheritanceConfiguration,
    /// Ordered kind filter; `None` collects every kind
    pub intercepting_metadata: Option<Vec<String>>,
}

impl ResolutionSettings {
    pub fn new(inheritance: InheritanceConfiguration) -> Self {
        Self {
            inheritance,
            intercepting_metadata: None,
        }
    }

    pub fn with_intercepting_metadata<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intercepting_metadata = Some(kinds.into_iter().map(Into::into).collect());
        self
    }
}
