//! Raw metadata access and per-flavor semantics.
//!
//! A [`MetaDataSource`] answers "what is declared right here", with no
//! inheritance. A [`MetaDataFlavor`] tells the collectors how to identify a
//! datum's kind and which data apply to which element kinds. Everything
//! hierarchical lives in [`crate::collector`].

pub mod annotation;

use crate::hierarchy::{ElementKind, MethodRef, TypeName};
use std::borrow::Cow;
use std::fmt::Debug;

pub use annotation::{Annotation, AnnotationFlavor};

/// Metadata declared directly on a declaration, without inheritance.
pub trait MetaDataSource<M>: Send + Sync {
    fn type_metadata(&self, ty: &TypeName) -> Vec<M>;

    fn method_metadata(&self, method: &MethodRef) -> Vec<M>;
}

/// Kind identity and applicability rules for one metadata representation.
pub trait MetaDataFlavor: Send + Sync {
    type Datum: Clone + Debug + Send + Sync + 'static;

    /// Stable key identifying the datum's kind. Two data with equal kinds
    /// override one another.
    fn kind_of<'a>(&self, datum: &'a Self::Datum) -> Cow<'a, str>;

    /// Drop data that may not be attached to `element`.
    fn clean(&self, metadata: Vec<Self::Datum>, element: ElementKind) -> Vec<Self::Datum>;

    fn is_kind(&self, datum: &Self::Datum, kind: &str) -> bool {
        self.kind_of(datum) == kind
    }
}
