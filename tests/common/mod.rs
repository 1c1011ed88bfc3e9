// Shared fixtures for metainherit integration tests
#![allow(dead_code)]

use metainherit::hierarchy::{MethodDecl, TypeDecl};
use metainherit::{Annotation, MethodRef, MethodSignature, TypeModel};
use std::sync::Arc;

pub fn annotation(kind: &str) -> Annotation {
    Annotation::new(kind)
}

/// Annotation of `kind` tagged with the type it was declared on
pub fn from(kind: &str, declared_on: &str) -> Annotation {
    Annotation::new(kind).with_attribute("from", declared_on)
}

pub fn kinds(metadata: &[Annotation]) -> Vec<&str> {
    metadata.iter().map(|a| a.kind.as_str()).collect()
}

pub fn origin(metadata: &[Annotation], kind: &str) -> Option<String> {
    metadata
        .iter()
        .find(|a| a.kind == kind)
        .and_then(|a| a.attribute("from"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

pub fn no_arg(name: &str) -> MethodSignature {
    MethodSignature::new(name, Vec::<String>::new())
}

pub fn method(ty: &str, name: &str) -> MethodRef {
    MethodRef::new(ty, no_arg(name))
}

/// ```text
/// interface X { @K1 int f(); }
/// interface Y { @K2 int f(); }
/// class A implements X { @K3 int f() }
/// class B extends A implements Y { @K4 int f() }
/// ```
pub fn interface_scenario() -> Arc<TypeModel> {
    Arc::new(
        TypeModel::builder()
            .declare(
                TypeDecl::interface("X")
                    .method(MethodDecl::new("f", Vec::<String>::new()).annotated(annotation("K1"))),
            )
            .declare(
                TypeDecl::interface("Y")
                    .method(MethodDecl::new("f", Vec::<String>::new()).annotated(annotation("K2"))),
            )
            .declare(
                TypeDecl::class("A")
                    .implements("X")
                    .method(MethodDecl::new("f", Vec::<String>::new()).annotated(annotation("K3"))),
            )
            .declare(
                TypeDecl::class("B")
                    .extends("A")
                    .implements("Y")
                    .method(MethodDecl::new("f", Vec::<String>::new()).annotated(annotation("K4"))),
            )
            .build()
            .unwrap(),
    )
}

/// `C extends B implements Y`, `B extends A implements X`. Each type named
/// in `declaring_k` carries kind `K` on the type and on `f()`, tagged with
/// its own name.
pub fn precedence_model(declaring_k: &[&str]) -> Arc<TypeModel> {
    let decorate = |decl: TypeDecl| -> TypeDecl {
        let name = decl.name.as_str().to_string();
        let mut f = MethodDecl::new("f", Vec::<String>::new());
        let mut decl = decl;
        if declaring_k.contains(&name.as_str()) {
            f = f.annotated(from("K", &name));
            decl = decl.annotated(from("K", &name));
        }
        decl.method(f)
    };

    Arc::new(
        TypeModel::builder()
            .declare(decorate(TypeDecl::interface("X")))
            .declare(decorate(TypeDecl::interface("Y")))
            .declare(decorate(TypeDecl::class("A").implements("X")))
            .declare(decorate(TypeDecl::class("B").extends("A").implements("X")))
            .declare(decorate(TypeDecl::class("C").extends("B").implements("Y")))
            .build()
            .unwrap(),
    )
}
