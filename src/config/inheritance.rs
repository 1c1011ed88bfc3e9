use serde::{Deserialize, Serialize};
use std::fmt;

/// Which hierarchy edges contribute metadata during resolution.
///
/// The flags are independent. `include_packages` is accepted and stored but
/// package-level metadata is never collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InheritanceConfiguration {
    /// Metadata declared on the type itself
    #[serde(default = "default_include_class")]
    pub include_class: bool,

    /// Metadata declared on superclasses (and superclass method overrides)
    #[serde(default)]
    pub include_superclasses: bool,

    /// Metadata declared on implemented interfaces
    #[serde(default = "default_include_interfaces")]
    pub include_interfaces: bool,

    /// Package-level metadata (no-op)
    #[serde(default)]
    pub include_packages: bool,
}

pub fn default_include_class() -> bool {
    true
}

pub fn default_include_interfaces() -> bool {
    true
}

impl Default for InheritanceConfiguration {
    fn default() -> Self {
        Self {
            include_class: default_include_class(),
            include_superclasses: false,
            include_interfaces: default_include_interfaces(),
            include_packages: false,
        }
    }
}

impl InheritanceConfiguration {
    /// Every edge except packages.
    pub fn full() -> Self {
        Self {
            include_superclasses: true,
            ..Self::default()
        }
    }

    pub fn set_include_class(&mut self, include: bool) {
        self.include_class = include;
    }

    pub fn set_include_superclasses(&mut self, include: bool) {
        self.include_superclasses = include;
    }

    pub fn set_include_interfaces(&mut self, include: bool) {
        self.include_interfaces = include;
    }

    pub fn set_include_packages(&mut self, include: bool) {
        self.include_packages = include;
    }
}

impl fmt::Display for InheritanceConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "class={} superclasses={} interfaces={} packages={}",
            self.include_class,
            self.include_superclasses,
            self.include_interfaces,
            self.include_packages
        )
    }
}
