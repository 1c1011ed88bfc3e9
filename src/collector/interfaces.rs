//! Interface-union metadata collection.
//!
//! Unlike [`super::GenericMetaDataCollector`] this collector has no notion
//! of precedence: it returns everything declared on a type or method plus
//! everything declared on the interfaces reachable through the superclass
//! chain, with exact duplicates removed.

use super::merge::union_distinct;
use crate::errors::{Error, Result};
use crate::hierarchy::{MethodRef, TypeHierarchy, TypeName};
use crate::metadata::{MetaDataFlavor, MetaDataSource};
use std::sync::Arc;

pub struct InterfaceMetaDataCollector<F: MetaDataFlavor> {
    flavor: F,
    hierarchy: Arc<dyn TypeHierarchy>,
    delegate: Arc<dyn MetaDataSource<F::Datum>>,
}

impl<F> InterfaceMetaDataCollector<F>
where
    F: MetaDataFlavor,
    F::Datum: PartialEq,
{
    pub fn builder(flavor: F) -> InterfaceMetaDataCollectorBuilder<F> {
        InterfaceMetaDataCollectorBuilder {
            flavor,
            hierarchy: None,
            delegate: None,
        }
    }

    /// Metadata on `ty` and on every interface it implements, directly or
    /// through a superclass.
    pub fn resolve_for_type(&self, ty: &TypeName) -> Vec<F::Datum> {
        let mut result = self.delegate.type_metadata(ty);
        for interface in self.all_interfaces(ty) {
            union_distinct(&mut result, self.delegate.type_metadata(&interface));
        }
        result
    }

    pub fn resolve_for_type_of_kind(&self, ty: &TypeName, kind: &str) -> Vec<F::Datum> {
        self.only_kind(self.resolve_for_type(ty), kind)
    }

    /// Metadata on `method` and on each same-signature method declared by an
    /// interface of its declaring type. Interfaces lacking the method are
    /// skipped.
    pub fn resolve_for_method(&self, method: &MethodRef) -> Vec<F::Datum> {
        let mut result = self.delegate.method_metadata(method);
        for interface in self.all_interfaces(&method.declaring_type) {
            if let Some(declared) = self.hierarchy.declared_method(&interface, &method.signature) {
                union_distinct(&mut result, self.delegate.method_metadata(&declared));
            }
        }
        result
    }

    pub fn resolve_for_method_of_kind(&self, method: &MethodRef, kind: &str) -> Vec<F::Datum> {
        self.only_kind(self.resolve_for_method(method), kind)
    }

    /// Append the direct interfaces of `ty`, then those of each superclass,
    /// to `acc`. Stops at the root type, or where the superclass chain
    /// loops back on itself.
    pub fn collect_all_interfaces(&self, ty: &TypeName, acc: &mut Vec<TypeName>) {
        acc.extend(self.hierarchy.interfaces_of(ty));
        for superclass in self.hierarchy.superclasses_of(ty) {
            acc.extend(self.hierarchy.interfaces_of(&superclass));
        }
    }

    fn all_interfaces(&self, ty: &TypeName) -> Vec<TypeName> {
        let mut interfaces = Vec::new();
        self.collect_all_interfaces(ty, &mut interfaces);
        interfaces
    }

    fn only_kind(&self, metadata: Vec<F::Datum>, kind: &str) -> Vec<F::Datum> {
        metadata
            .into_iter()
            .filter(|datum| self.flavor.is_kind(datum, kind))
            .collect()
    }
}

pub struct InterfaceMetaDataCollectorBuilder<F: MetaDataFlavor> {
    flavor: F,
    hierarchy: Option<Arc<dyn TypeHierarchy>>,
    delegate: Option<Arc<dyn MetaDataSource<F::Datum>>>,
}

impl<F> InterfaceMetaDataCollectorBuilder<F>
where
    F: MetaDataFlavor,
    F::Datum: PartialEq,
{
    pub fn hierarchy(mut self, hierarchy: Arc<dyn TypeHierarchy>) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    pub fn delegate(mut self, delegate: Arc<dyn MetaDataSource<F::Datum>>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn build(self) -> Result<InterfaceMetaDataCollector<F>> {
        let delegate = self.delegate.ok_or_else(|| {
            Error::Configuration("interface metadata collector requires a metadata delegate".into())
        })?;
        let hierarchy = self.hierarchy.ok_or_else(|| {
            Error::Configuration("interface metadata collector requires a type hierarchy".into())
        })?;
        Ok(InterfaceMetaDataCollector {
            flavor: self.flavor,
            hierarchy,
            delegate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{MethodDecl, MethodSignature, TypeDecl, TypeModel};
    use crate::metadata::{Annotation, AnnotationFlavor};

    fn collector(model: TypeModel) -> InterfaceMetaDataCollector<AnnotationFlavor> {
        let model = Arc::new(model);
        InterfaceMetaDataCollector::builder(AnnotationFlavor)
            .hierarchy(model.clone())
            .delegate(model)
            .build()
            .unwrap()
    }

    fn model() -> TypeModel {
        TypeModel::builder()
            .root("Object")
            .declare(
                TypeDecl::interface("X")
                    .annotated(Annotation::new("K1"))
                    .method(MethodDecl::new("f", ["int"]).annotated(Annotation::new("M1"))),
            )
            .declare(TypeDecl::interface("Y").annotated(Annotation::new("K2")))
            .declare(TypeDecl::interface("Z").implements("Y").annotated(Annotation::new("K3")))
            .declare(
                TypeDecl::class("A")
                    .extends("Object")
                    .implements("X")
                    .annotated(Annotation::new("K2"))
                    .method(MethodDecl::new("f", ["int"]).annotated(Annotation::new("M0"))),
            )
            .declare(TypeDecl::class("B").extends("A").implements("Z"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_collect_all_interfaces_walks_superclasses() {
        let collector = collector(model());
        let mut acc = Vec::new();
        collector.collect_all_interfaces(&TypeName::from("B"), &mut acc);
        assert_eq!(acc, vec![TypeName::from("Z"), TypeName::from("X")]);
    }

    /// `A extends B extends A`, each implementing its own interface.
    struct Cyclic;

    impl TypeHierarchy for Cyclic {
        fn superclass_of(&self, ty: &TypeName) -> Option<TypeName> {
            match ty.as_str() {
                "A" => Some("B".into()),
                "B" => Some("A".into()),
                _ => None,
            }
        }

        fn interfaces_of(&self, ty: &TypeName) -> Vec<TypeName> {
            match ty.as_str() {
                "A" => vec!["IA".into()],
                "B" => vec!["IB".into()],
                _ => Vec::new(),
            }
        }

        fn declared_method(&self, ty: &TypeName, signature: &MethodSignature) -> Option<MethodRef> {
            (ty.as_str() == "IB").then(|| MethodRef::new(ty.clone(), signature.clone()))
        }
    }

    impl MetaDataSource<Annotation> for Cyclic {
        fn type_metadata(&self, ty: &TypeName) -> Vec<Annotation> {
            vec![Annotation::new(format!("On{}", ty))]
        }

        fn method_metadata(&self, method: &MethodRef) -> Vec<Annotation> {
            vec![Annotation::new(format!("M{}", method.declaring_type))]
        }
    }

    #[test]
    fn test_cyclic_superclass_chain_ends_the_walk() {
        let cyclic = Arc::new(Cyclic);
        let collector = InterfaceMetaDataCollector::builder(AnnotationFlavor)
            .hierarchy(cyclic.clone())
            .delegate(cyclic)
            .build()
            .unwrap();

        let mut acc = Vec::new();
        collector.collect_all_interfaces(&TypeName::from("A"), &mut acc);
        assert_eq!(acc, vec![TypeName::from("IA"), TypeName::from("IB")]);

        let kinds: Vec<String> = collector
            .resolve_for_type(&TypeName::from("A"))
            .into_iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(kinds, vec!["OnA", "OnIA", "OnIB"]);

        let method = MethodRef::new("A", MethodSignature::new("f", Vec::<String>::new()));
        let kinds: Vec<String> = collector
            .resolve_for_method(&method)
            .into_iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(kinds, vec!["MA", "MIB"]);
    }

    #[test]
    fn test_type_union_includes_inherited_interfaces() {
        let collector = collector(model());
        let kinds: Vec<String> = collector
            .resolve_for_type(&TypeName::from("B"))
            .into_iter()
            .map(|a| a.kind)
            .collect();
        // Z is direct, X arrives through A; Y is only a super-interface of Z
        // and is not part of the union.
        assert_eq!(kinds, vec!["K3", "K1"]);
    }

    #[test]
    fn test_union_removes_identical_data_only() {
        let collector = collector(model());
        let union = collector.resolve_for_type(&TypeName::from("A"));
        assert_eq!(union, vec![Annotation::new("K2"), Annotation::new("K1")]);
    }

    #[test]
    fn test_method_union_skips_interfaces_without_method() {
        let collector = collector(model());
        let method = MethodRef::new("A", MethodSignature::new("f", ["int"]));
        let kinds: Vec<String> = collector
            .resolve_for_method(&method)
            .into_iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(kinds, vec!["M0", "M1"]);

        let filtered = collector.resolve_for_method_of_kind(&method, "M1");
        assert_eq!(filtered, vec![Annotation::new("M1")]);
    }

    #[test]
    fn test_build_fails_without_delegate() {
        let model: Arc<TypeModel> = Arc::new(model());
        let result = InterfaceMetaDataCollector::builder(AnnotationFlavor)
            .hierarchy(model)
            .build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
