//! Annotation-style metadata, the default flavor.

use super::MetaDataFlavor;
use crate::hierarchy::ElementKind;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// An annotation instance attached to a type or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation type name; this is the override identity.
    pub kind: String,
    /// Element kinds the annotation type may be placed on. `None` means
    /// anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<ElementKind>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl Annotation {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            targets: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = ElementKind>) -> Self {
        self.targets = Some(targets.into_iter().collect());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn applies_to(&self, element: ElementKind) -> bool {
        self.targets
            .as_ref()
            .is_none_or(|targets| targets.contains(&element))
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.kind)?;
        if !self.attributes.is_empty() {
            let rendered: Vec<String> = self
                .attributes
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            write!(f, "({})", rendered.join(", "))?;
        }
        Ok(())
    }
}

/// Flavor for [`Annotation`]: kind is the annotation type name, and
/// cleaning honours the declared targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationFlavor;

impl MetaDataFlavor for AnnotationFlavor {
    type Datum = Annotation;

    fn kind_of<'a>(&self, datum: &'a Annotation) -> Cow<'a, str> {
        Cow::Borrowed(datum.kind.as_str())
    }

    fn clean(&self, metadata: Vec<Annotation>, element: ElementKind) -> Vec<Annotation> {
        metadata
            .into_iter()
            .filter(|annotation| {
                let keep = annotation.applies_to(element);
                if !keep {
                    log::trace!("Dropping {} not applicable to {}", annotation, element);
                }
                keep
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untargeted_annotation_applies_everywhere() {
        let annotation = Annotation::new("Audited");
        assert!(annotation.applies_to(ElementKind::Type));
        assert!(annotation.applies_to(ElementKind::Method));
        assert!(annotation.applies_to(ElementKind::Field));
    }

    #[test]
    fn test_clean_drops_type_only_annotations_for_methods() {
        let metadata = vec![
            Annotation::new("Entity").with_targets([ElementKind::Type]),
            Annotation::new("Transactional").with_targets([ElementKind::Type, ElementKind::Method]),
            Annotation::new("Audited"),
        ];

        let cleaned = AnnotationFlavor.clean(metadata, ElementKind::Method);
        let kinds: Vec<&str> = cleaned.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Transactional", "Audited"]);
    }

    #[test]
    fn test_display_includes_attributes() {
        let annotation = Annotation::new("Timeout").with_attribute("seconds", 30);
        assert_eq!(annotation.to_string(), "@Timeout(seconds=30)");
    }

    #[test]
    fn test_kind_of_is_type_name() {
        let annotation = Annotation::new("Cached").with_attribute("region", "users");
        assert_eq!(AnnotationFlavor.kind_of(&annotation), "Cached");
        assert!(AnnotationFlavor.is_kind(&annotation, "Cached"));
        assert!(!AnnotationFlavor.is_kind(&annotation, "Cache"));
    }
}
