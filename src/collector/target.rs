//! Resolution cursor.
//!
//! A [`Target`] says where a walk currently is: which element metadata is
//! being collected for, which runtime type is under analysis, which ancestor
//! is being visited and in what phase. Targets are values; every step of a
//! walk derives a new one, so sibling branches never observe each other's
//! `parent`.

use crate::hierarchy::{MethodRef, TargetElement, TypeName};
use std::fmt;

/// Where the metadata currently being collected comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionPhase {
    /// The target method itself
    FromTarget,
    /// The target type itself
    FromClass,
    /// A superclass or interface of the target type
    FromParentClass,
    /// The same-signature method on a superclass or interface
    FromParentTarget,
}

impl fmt::Display for ResolutionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionPhase::FromTarget => "FROM_TARGET",
            ResolutionPhase::FromClass => "FROM_CLASS",
            ResolutionPhase::FromParentClass => "FROM_PARENT_CLASS",
            ResolutionPhase::FromParentTarget => "FROM_PARENT_TARGET",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    element: TargetElement,
    declaring_type: TypeName,
    parent: Option<TypeName>,
    phase: ResolutionPhase,
}

impl Target {
    /// Cursor for resolving `method` as invoked on `declaring_type`.
    pub fn for_method(method: MethodRef, declaring_type: TypeName) -> Self {
        Self {
            element: TargetElement::Method(method),
            declaring_type,
            parent: None,
            phase: ResolutionPhase::FromTarget,
        }
    }

    /// Cursor for resolving the type-level metadata of `ty`.
    pub fn for_type(ty: TypeName) -> Self {
        Self {
            element: TargetElement::Type(ty.clone()),
            declaring_type: ty,
            parent: None,
            phase: ResolutionPhase::FromClass,
        }
    }

    pub fn element(&self) -> &TargetElement {
        &self.element
    }

    pub fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    pub fn parent(&self) -> Option<&TypeName> {
        self.parent.as_ref()
    }

    pub fn phase(&self) -> ResolutionPhase {
        self.phase
    }

    pub fn with_phase(&self, phase: ResolutionPhase) -> Self {
        Self {
            phase,
            ..self.clone()
        }
    }

    pub fn with_element(&self, element: TargetElement) -> Self {
        Self {
            element,
            ..self.clone()
        }
    }

    /// Cursor positioned on ancestor `parent` in `phase`.
    pub fn visiting(&self, parent: TypeName, phase: ResolutionPhase) -> Self {
        Self {
            parent: Some(parent),
            phase,
            ..self.clone()
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {} [{}]", self.element, self.declaring_type, self.phase)?;
        if let Some(parent) = &self.parent {
            write!(f, " via {}", parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::MethodSignature;

    #[test]
    fn test_derived_targets_leave_original_untouched() {
        let method = MethodRef::new("A", MethodSignature::new("f", ["int"]));
        let target = Target::for_method(method, TypeName::from("B"));

        let visiting = target.visiting(TypeName::from("A"), ResolutionPhase::FromParentTarget);
        assert_eq!(visiting.parent(), Some(&TypeName::from("A")));
        assert_eq!(visiting.phase(), ResolutionPhase::FromParentTarget);

        assert_eq!(target.parent(), None);
        assert_eq!(target.phase(), ResolutionPhase::FromTarget);
        assert_eq!(visiting.declaring_type(), target.declaring_type());
    }

    #[test]
    fn test_type_target_starts_in_class_phase() {
        let target = Target::for_type(TypeName::from("C"));
        assert_eq!(target.phase(), ResolutionPhase::FromClass);
        assert_eq!(target.element(), &TargetElement::Type(TypeName::from("C")));
        assert_eq!(target.to_string(), "type C on C [FROM_CLASS]");
    }
}
