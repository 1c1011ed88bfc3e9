//! In-memory type model.
//!
//! A `TypeModel` is a validated set of class and interface declarations
//! together with the annotations placed on them and on their methods. It is
//! the concrete hierarchy used by the CLI and the test suites, and it can be
//! loaded from JSON, YAML or TOML.

use super::{MethodRef, MethodSignature, TypeHierarchy, TypeName};
use crate::errors::{Error, Result, ResultExt};
use crate::metadata::{Annotation, MetaDataSource};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Whether a declaration is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    #[default]
    Class,
    Interface,
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Class => f.write_str("class"),
            TypeShape::Interface => f.write_str("interface"),
        }
    }
}

/// A method declared on a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MethodDecl {
    pub fn new<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            annotations: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    fn matches(&self, signature: &MethodSignature) -> bool {
        self.name == signature.name && self.parameters == signature.parameter_types
    }

    pub fn signature(&self) -> MethodSignature {
        MethodSignature::new(self.name.clone(), self.parameters.iter().cloned())
    }
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: TypeName,
    #[serde(default)]
    pub shape: TypeShape,
    #[serde(default)]
    pub superclass: Option<TypeName>,
    #[serde(default)]
    pub interfaces: Vec<TypeName>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self::with_shape(name, TypeShape::Class)
    }

    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self::with_shape(name, TypeShape::Interface)
    }

    fn with_shape(name: impl Into<TypeName>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            superclass: None,
            interfaces: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: impl Into<TypeName>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Implemented interfaces for classes, extended interfaces for interfaces.
    pub fn implements(mut self, interface: impl Into<TypeName>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    fn find_method(&self, signature: &MethodSignature) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.matches(signature))
    }
}

/// Serialized form of a model file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TypeModelFile {
    #[serde(default)]
    root: Option<TypeName>,
    #[serde(default)]
    types: Vec<TypeDecl>,
}

/// Validated collection of type declarations.
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    root: Option<TypeName>,
    types: HashMap<TypeName, TypeDecl>,
    order: Vec<TypeName>,
}

/// Counts reported by `metainherit check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub classes: usize,
    pub interfaces: usize,
    pub methods: usize,
    pub annotations: usize,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} classes, {} interfaces, {} methods, {} annotations",
            self.classes, self.interfaces, self.methods, self.annotations
        )
    }
}

impl TypeModel {
    pub fn builder() -> TypeModelBuilder {
        TypeModelBuilder::default()
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Self::from_file(serde_json::from_str(contents)?)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Self::from_file(serde_yaml::from_str(contents)?)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Self::from_file(toml::from_str(contents)?)
    }

    /// Load a model file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(Error::from)
            .context(format!("Failed to read model {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let model = match extension.as_str() {
            "json" => Self::from_json_str(&contents),
            "yaml" | "yml" => Self::from_yaml_str(&contents),
            "toml" => Self::from_toml_str(&contents),
            other => Err(Error::Model(format!(
                "unrecognized model format '{}' (expected json, yaml or toml)",
                other
            ))),
        }
        .context(format!("Failed to load model {}", path.display()))?;

        log::debug!(
            "Loaded model {} ({})",
            path.display(),
            model.summary()
        );
        Ok(model)
    }

    fn from_file(file: TypeModelFile) -> Result<Self> {
        let mut builder = TypeModelBuilder {
            root: file.root,
            decls: Vec::new(),
        };
        for decl in file.types {
            builder = builder.declare(decl);
        }
        builder.build()
    }

    pub fn root(&self) -> Option<&TypeName> {
        self.root.as_ref()
    }

    pub fn get(&self, ty: &TypeName) -> Option<&TypeDecl> {
        self.types.get(ty)
    }

    pub fn contains(&self, ty: &TypeName) -> bool {
        self.types.contains_key(ty)
    }

    /// Declarations in the order they were declared.
    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn summary(&self) -> ModelSummary {
        let decls = || self.types.values();
        ModelSummary {
            classes: decls().filter(|d| d.shape == TypeShape::Class).count(),
            interfaces: decls().filter(|d| d.shape == TypeShape::Interface).count(),
            methods: decls().map(|d| d.methods.len()).sum(),
            annotations: decls()
                .map(|d| d.annotations.len() + d.methods.iter().map(|m| m.annotations.len()).sum::<usize>())
                .sum(),
        }
    }

    /// Reference to the method with `signature` as declared on `ty`.
    pub fn method_ref(&self, ty: &TypeName, signature: &MethodSignature) -> Option<MethodRef> {
        self.get(ty)
            .and_then(|decl| decl.find_method(signature))
            .map(|m| MethodRef::new(ty.clone(), m.signature()))
    }

    fn is_implicit_root(&self, ty: &TypeName) -> bool {
        self.root.as_ref() == Some(ty) && !self.types.contains_key(ty)
    }
}

impl TypeHierarchy for TypeModel {
    fn superclass_of(&self, ty: &TypeName) -> Option<TypeName> {
        self.get(ty).and_then(|decl| decl.superclass.clone())
    }

    fn interfaces_of(&self, ty: &TypeName) -> Vec<TypeName> {
        self.get(ty)
            .map(|decl| decl.interfaces.clone())
            .unwrap_or_default()
    }

    fn declared_method(&self, ty: &TypeName, signature: &MethodSignature) -> Option<MethodRef> {
        self.method_ref(ty, signature)
    }

    fn is_root(&self, ty: &TypeName) -> bool {
        self.root.as_ref() == Some(ty)
    }
}

impl MetaDataSource<Annotation> for TypeModel {
    fn type_metadata(&self, ty: &TypeName) -> Vec<Annotation> {
        self.get(ty)
            .map(|decl| decl.annotations.clone())
            .unwrap_or_default()
    }

    fn method_metadata(&self, method: &MethodRef) -> Vec<Annotation> {
        self.get(&method.declaring_type)
            .and_then(|decl| decl.find_method(&method.signature))
            .map(|m| m.annotations.clone())
            .unwrap_or_default()
    }
}

/// Collects declarations and validates them into a [`TypeModel`].
#[derive(Debug, Default)]
pub struct TypeModelBuilder {
    root: Option<TypeName>,
    decls: Vec<TypeDecl>,
}

impl TypeModelBuilder {
    /// Name of the universal root class (e.g. `java.lang.Object`). It need
    /// not be declared.
    pub fn root(mut self, root: impl Into<TypeName>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn declare(mut self, decl: TypeDecl) -> Self {
        self.decls.push(decl);
        self
    }

    pub fn build(self) -> Result<TypeModel> {
        let mut model = TypeModel {
            root: self.root,
            types: HashMap::with_capacity(self.decls.len()),
            order: Vec::with_capacity(self.decls.len()),
        };

        for decl in self.decls {
            if model.types.contains_key(&decl.name) {
                return Err(Error::Model(format!("type {} is declared twice", decl.name)));
            }
            check_unique_methods(&decl)?;
            model.order.push(decl.name.clone());
            model.types.insert(decl.name.clone(), decl);
        }

        for decl in model.types() {
            check_references(&model, decl)?;
        }
        check_acyclic(&model)?;

        Ok(model)
    }
}

fn check_unique_methods(decl: &TypeDecl) -> Result<()> {
    let mut seen = HashSet::new();
    for method in &decl.methods {
        if !seen.insert(method.signature()) {
            return Err(Error::Model(format!(
                "method {} is declared twice on {}",
                method.signature(),
                decl.name
            )));
        }
    }
    Ok(())
}

fn check_references(model: &TypeModel, decl: &TypeDecl) -> Result<()> {
    if let Some(superclass) = &decl.superclass {
        if decl.shape == TypeShape::Interface {
            return Err(Error::Model(format!(
                "interface {} cannot extend class {}; list it under interfaces",
                decl.name, superclass
            )));
        }
        if !model.is_implicit_root(superclass) {
            match model.get(superclass) {
                None => {
                    return Err(Error::Model(format!(
                        "{} extends unknown type {}",
                        decl.name, superclass
                    )))
                }
                Some(parent) if parent.shape != TypeShape::Class => {
                    return Err(Error::Model(format!(
                        "{} extends {}, which is an interface",
                        decl.name, superclass
                    )))
                }
                Some(_) => {}
            }
        }
    }

    for interface in &decl.interfaces {
        match model.get(interface) {
            None => {
                return Err(Error::Model(format!(
                    "{} implements unknown type {}",
                    decl.name, interface
                )))
            }
            Some(parent) if parent.shape != TypeShape::Interface => {
                return Err(Error::Model(format!(
                    "{} implements {}, which is a class",
                    decl.name, interface
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

fn check_acyclic(model: &TypeModel) -> Result<()> {
    let mut state: HashMap<&TypeName, Visit> = HashMap::new();
    for decl in model.types() {
        visit(model, &decl.name, &mut state, &mut Vec::new())?;
    }
    Ok(())
}

fn visit<'a>(
    model: &'a TypeModel,
    ty: &'a TypeName,
    state: &mut HashMap<&'a TypeName, Visit>,
    path: &mut Vec<&'a TypeName>,
) -> Result<()> {
    match state.get(ty) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => {
            let chain: Vec<String> = path
                .iter()
                .skip_while(|name| **name != ty)
                .map(|name| name.to_string())
                .chain(std::iter::once(ty.to_string()))
                .collect();
            return Err(Error::Model(format!(
                "inheritance cycle: {}",
                chain.join(" -> ")
            )));
        }
        None => {}
    }

    let Some(decl) = model.get(ty) else {
        return Ok(());
    };

    state.insert(ty, Visit::InProgress);
    path.push(ty);
    for parent in decl.superclass.iter().chain(decl.interfaces.iter()) {
        visit(model, parent, state, path)?;
    }
    path.pop();
    state.insert(ty, Visit::Done);
    Ok(())
}
