//! Type hierarchy abstraction used by metadata resolution.
//!
//! Resolution never reflects over real types. It asks a [`TypeHierarchy`]
//! for superclasses, interfaces and declared methods, so the walk works the
//! same against a deserialized [`TypeModel`], a compiler's symbol table, or
//! anything else that can answer those questions.

pub mod model;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use model::{MethodDecl, ModelSummary, TypeDecl, TypeModel, TypeModelBuilder, TypeShape};

/// Fully qualified name of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Method identity for override purposes: name plus parameter types.
///
/// Two declarations with equal signatures on related types are treated as
/// the same method, one overriding the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub parameter_types: Vec<String>,
}

impl MethodSignature {
    pub fn new<I, S>(name: impl Into<String>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameter_types.join(", "))
    }
}

/// A method as declared on one particular type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodRef {
    pub declaring_type: TypeName,
    pub signature: MethodSignature,
}

impl MethodRef {
    pub fn new(declaring_type: impl Into<TypeName>, signature: MethodSignature) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            signature,
        }
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.signature)
    }
}

/// Program element a piece of metadata may be attached to.
///
/// Only [`ElementKind::Type`] and [`ElementKind::Method`] can be resolved;
/// the remaining kinds exist so annotations can declare them as targets and
/// so asking for them is a reportable error rather than an impossibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Type,
    Method,
    Field,
    Parameter,
    Constructor,
    LocalVariable,
    AnnotationType,
    Package,
}

impl ElementKind {
    pub fn is_resolvable(self) -> bool {
        matches!(self, ElementKind::Type | ElementKind::Method)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Type => "type",
            ElementKind::Method => "method",
            ElementKind::Field => "field",
            ElementKind::Parameter => "parameter",
            ElementKind::Constructor => "constructor",
            ElementKind::LocalVariable => "local_variable",
            ElementKind::AnnotationType => "annotation_type",
            ElementKind::Package => "package",
        };
        f.write_str(name)
    }
}

/// The element metadata is being resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetElement {
    Method(MethodRef),
    Type(TypeName),
}

impl TargetElement {
    pub fn as_method(&self) -> Option<&MethodRef> {
        match self {
            TargetElement::Method(method) => Some(method),
            TargetElement::Type(_) => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeName> {
        match self {
            TargetElement::Type(ty) => Some(ty),
            TargetElement::Method(_) => None,
        }
    }
}

impl fmt::Display for TargetElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetElement::Method(method) => write!(f, "method {}", method),
            TargetElement::Type(ty) => write!(f, "type {}", ty),
        }
    }
}

impl From<MethodRef> for TargetElement {
    fn from(method: MethodRef) -> Self {
        TargetElement::Method(method)
    }
}

impl From<TypeName> for TargetElement {
    fn from(ty: TypeName) -> Self {
        TargetElement::Type(ty)
    }
}

/// Call descriptor handed over by an interception layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInvocation {
    /// The method being invoked, as seen by the caller.
    pub method: MethodRef,
    /// Runtime type of the receiver; `None` for receiver-less calls.
    pub receiver_type: Option<TypeName>,
}

impl MethodInvocation {
    pub fn new(method: MethodRef, receiver_type: impl Into<TypeName>) -> Self {
        Self {
            method,
            receiver_type: Some(receiver_type.into()),
        }
    }

    pub fn without_receiver(method: MethodRef) -> Self {
        Self {
            method,
            receiver_type: None,
        }
    }

    /// Type whose hierarchy is analysed for this call.
    pub fn declaring_type(&self) -> &TypeName {
        self.receiver_type
            .as_ref()
            .unwrap_or(&self.method.declaring_type)
    }
}

/// Structural questions resolution asks about types.
///
/// Implementations must answer with *direct* relationships only; the
/// collectors do the transitive walking themselves.
pub trait TypeHierarchy: Send + Sync {
    /// Direct superclass, or `None` for interfaces and hierarchy roots.
    fn superclass_of(&self, ty: &TypeName) -> Option<TypeName>;

    /// Directly implemented (or, for interfaces, extended) interfaces in
    /// declaration order.
    fn interfaces_of(&self, ty: &TypeName) -> Vec<TypeName>;

    /// The method with `signature` declared directly on `ty`, if any.
    /// Inherited methods do not count.
    fn declared_method(&self, ty: &TypeName, signature: &MethodSignature) -> Option<MethodRef>;

    /// Whether `ty` is the universal root type where superclass walks stop.
    fn is_root(&self, _ty: &TypeName) -> bool {
        false
    }

    /// The declaration that actually runs when `method` is called on an
    /// instance of `declaring_type`: the type's own override if it declares
    /// one, otherwise `method` itself.
    fn most_specific_method(&self, declaring_type: &TypeName, method: &MethodRef) -> MethodRef {
        self.declared_method(declaring_type, &method.signature)
            .unwrap_or_else(|| method.clone())
    }

    /// Superclass chain of `ty`, nearest first, excluding the root type.
    fn superclasses_of(&self, ty: &TypeName) -> Vec<TypeName> {
        let mut chain = Vec::new();
        let mut current = self.superclass_of(ty);
        while let Some(parent) = current {
            if self.is_root(&parent) || chain.contains(&parent) || &parent == ty {
                break;
            }
            current = self.superclass_of(&parent);
            chain.push(parent);
        }
        chain
    }
}
