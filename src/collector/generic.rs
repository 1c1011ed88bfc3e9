//! Precedence-resolving metadata collector.
//!
//! Resolution walks from the most specific declaration outwards and merges
//! each level with [`merge_by_hierarchy`], so a kind found closer to the
//! target always suppresses the same kind found further away.
//!
//! Method precedence, highest first:
//!
//! 1. the declaring type's own override of the method
//! 2. the method reference as passed in, if it is a different declaration
//! 3. overrides on superclasses, nearest first (`include_superclasses`)
//! 4. the method on interfaces of the declaring type (`include_interfaces`)
//! 5. the method on interfaces of superclasses (`include_interfaces`)
//! 6. the type-level resolution of the declaring type
//!
//! Type precedence, highest first: the type itself (`include_class`),
//! superclasses nearest first (`include_superclasses`), interfaces of the
//! type (`include_interfaces`), interfaces of superclasses (both flags).
//! Interfaces are walked breadth first and each is visited once.

use super::cache::{CacheKey, CacheStats, MetaDataCache};
use super::merge::{dedupe_by_kind, merge_by_hierarchy};
use super::target::{ResolutionPhase, Target};
use crate::config::{InheritanceConfiguration, ResolutionSettings};
use crate::errors::{Error, Result};
use crate::hierarchy::{
    ElementKind, MethodInvocation, MethodRef, TargetElement, TypeHierarchy, TypeModel, TypeName,
};
use crate::metadata::{AnnotationFlavor, MetaDataFlavor, MetaDataSource};
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// One `get_metadata` call, for batch pre-warming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub element: TargetElement,
    pub kind: ElementKind,
    pub declaring_type: TypeName,
}

impl ResolutionRequest {
    pub fn method(method: MethodRef, declaring_type: impl Into<TypeName>) -> Self {
        Self {
            element: TargetElement::Method(method),
            kind: ElementKind::Method,
            declaring_type: declaring_type.into(),
        }
    }

    pub fn for_type(ty: impl Into<TypeName>) -> Self {
        let ty = ty.into();
        Self {
            element: TargetElement::Type(ty.clone()),
            kind: ElementKind::Type,
            declaring_type: ty,
        }
    }
}

pub struct GenericMetaDataCollector<F: MetaDataFlavor> {
    flavor: F,
    hierarchy: Arc<dyn TypeHierarchy>,
    source: Arc<dyn MetaDataSource<F::Datum>>,
    cache: MetaDataCache<F::Datum>,
}

/// Collector over [`Annotation`](crate::metadata::Annotation)s.
pub type AnnotationMetaDataCollector = GenericMetaDataCollector<AnnotationFlavor>;

impl AnnotationMetaDataCollector {
    pub fn from_model(model: Arc<TypeModel>) -> Self {
        Self::new(AnnotationFlavor, model.clone(), model)
    }
}

impl<F: MetaDataFlavor> GenericMetaDataCollector<F> {
    pub fn new(
        flavor: F,
        hierarchy: Arc<dyn TypeHierarchy>,
        source: Arc<dyn MetaDataSource<F::Datum>>,
    ) -> Self {
        Self {
            flavor,
            hierarchy,
            source,
            cache: MetaDataCache::new(ResolutionSettings::default()),
        }
    }

    pub fn with_settings(self, settings: ResolutionSettings) -> Self {
        self.apply_settings(settings);
        self
    }

    pub fn flavor(&self) -> &F {
        &self.flavor
    }

    /// Resolved metadata for `element` analysed on `declaring_type`.
    ///
    /// `kind` must be [`ElementKind::Method`] with a method element or
    /// [`ElementKind::Type`] with a type element. Results are cached per
    /// `(declaring_type, element)` until the settings change.
    pub fn get_metadata(
        &self,
        element: &TargetElement,
        kind: ElementKind,
        declaring_type: &TypeName,
    ) -> Result<Arc<[F::Datum]>> {
        if !kind.is_resolvable() {
            return Err(Error::UnsupportedElementKind(kind));
        }
        let target = match (kind, element) {
            (ElementKind::Method, TargetElement::Method(method)) => {
                Target::for_method(method.clone(), declaring_type.clone())
            }
            (ElementKind::Type, TargetElement::Type(ty)) => Target::for_type(ty.clone()),
            (ElementKind::Method, other) => {
                return Err(Error::mismatch(other, ResolutionPhase::FromTarget))
            }
            (_, other) => return Err(Error::mismatch(other, ResolutionPhase::FromClass)),
        };

        let key = CacheKey::new(declaring_type.clone(), element.clone());
        let _span = tracing::debug_span!("resolve_metadata", key = %key).entered();

        let generation = self.cache.generation();
        self.cache.get_or_compute(&generation, key, |settings| {
            let walk = Walk {
                flavor: &self.flavor,
                hierarchy: self.hierarchy.as_ref(),
                source: self.source.as_ref(),
                settings,
            };
            match kind {
                ElementKind::Method => walk.compute_method_metadata(&target),
                _ => walk.compute_class_metadata(&target),
            }
        })
    }

    /// Like [`Self::get_metadata`], analysing the invocation's receiver type.
    pub fn get_metadata_for_invocation(
        &self,
        element: &TargetElement,
        invocation: &MethodInvocation,
        kind: ElementKind,
    ) -> Result<Arc<[F::Datum]>> {
        self.get_metadata(element, kind, invocation.declaring_type())
    }

    pub fn get_method_operating_metadata(
        &self,
        method: &MethodRef,
        declaring_type: &TypeName,
    ) -> Result<Arc<[F::Datum]>> {
        self.get_metadata(
            &TargetElement::Method(method.clone()),
            ElementKind::Method,
            declaring_type,
        )
    }

    pub fn get_method_operating_metadata_for(
        &self,
        invocation: &MethodInvocation,
    ) -> Result<Arc<[F::Datum]>> {
        self.get_method_operating_metadata(&invocation.method, invocation.declaring_type())
    }

    /// Resolve a batch in parallel so later lookups are cache hits.
    pub fn warm_cache(&self, requests: &[ResolutionRequest]) -> Result<usize> {
        requests.par_iter().try_for_each(|request| {
            self.get_metadata(&request.element, request.kind, &request.declaring_type)
                .map(drop)
        })?;
        log::debug!("Warmed metadata cache with {} resolutions", requests.len());
        Ok(requests.len())
    }

    pub fn settings(&self) -> ResolutionSettings {
        self.cache.settings()
    }

    pub fn inheritance_configuration(&self) -> InheritanceConfiguration {
        self.settings().inheritance
    }

    pub fn intercepting_metadata(&self) -> Option<Vec<String>> {
        self.settings().intercepting_metadata
    }

    /// Replace the inheritance configuration. Discards cached results.
    pub fn set_inheritance_configuration(&self, inheritance: InheritanceConfiguration) {
        log::debug!("Inheritance configuration set to {}", inheritance);
        self.cache
            .update_settings(|settings| settings.inheritance = inheritance);
    }

    /// Restrict collection to `kinds`, or collect everything with `None`.
    /// Discards cached results.
    pub fn set_intercepting_metadata(&self, kinds: Option<Vec<String>>) {
        log::debug!("Intercepting metadata set to {:?}", kinds);
        self.cache
            .update_settings(|settings| settings.intercepting_metadata = kinds);
    }

    pub fn apply_settings(&self, settings: ResolutionSettings) {
        self.cache.update_settings(|current| *current = settings);
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

/// One resolution under one fixed set of settings.
struct Walk<'a, F: MetaDataFlavor> {
    flavor: &'a F,
    hierarchy: &'a dyn TypeHierarchy,
    source: &'a dyn MetaDataSource<F::Datum>,
    settings: &'a ResolutionSettings,
}

impl<F: MetaDataFlavor> Walk<'_, F> {
    fn merge(&self, bottom: Vec<F::Datum>, higher: Vec<F::Datum>) -> Vec<F::Datum> {
        merge_by_hierarchy(self.flavor, bottom, higher)
    }

    fn compute_method_metadata(&self, target: &Target) -> Result<Vec<F::Datum>> {
        let method = target
            .element()
            .as_method()
            .ok_or_else(|| Error::mismatch(target.element(), target.phase()))?;
        let declaring = target.declaring_type();
        let inheritance = self.settings.inheritance;

        let most_specific = self.hierarchy.most_specific_method(declaring, method);
        let own = self.attributes_for(
            &target
                .with_element(TargetElement::Method(most_specific.clone()))
                .with_phase(ResolutionPhase::FromTarget),
        )?;
        let mut result = dedupe_by_kind(self.flavor, own);
        if &most_specific != method {
            let original = self.attributes_for(&target.with_phase(ResolutionPhase::FromTarget))?;
            result = self.merge(result, original);
        }

        let superclasses = self.hierarchy.superclasses_of(declaring);
        if inheritance.include_superclasses {
            for superclass in &superclasses {
                let found = self.attributes_for(
                    &target.visiting(superclass.clone(), ResolutionPhase::FromParentTarget),
                )?;
                result = self.merge(result, found);
            }
        }

        if inheritance.include_interfaces {
            let mut visited = HashSet::new();
            result = self.metadata_from_interfaces(
                target,
                declaring,
                ResolutionPhase::FromParentTarget,
                result,
                &mut visited,
            )?;
            for superclass in &superclasses {
                result = self.metadata_from_interfaces(
                    target,
                    superclass,
                    ResolutionPhase::FromParentTarget,
                    result,
                    &mut visited,
                )?;
            }
        }

        let class_metadata = self.compute_class_metadata(&Target::for_type(declaring.clone()))?;
        result = self.merge(result, class_metadata);

        Ok(self.flavor.clean(result, ElementKind::Method))
    }

    fn compute_class_metadata(&self, target: &Target) -> Result<Vec<F::Datum>> {
        let ty = target
            .element()
            .as_type()
            .ok_or_else(|| Error::mismatch(target.element(), target.phase()))?;
        let inheritance = self.settings.inheritance;
        let mut result = Vec::new();

        if inheritance.include_class {
            let own = self.attributes_for(&target.with_phase(ResolutionPhase::FromClass))?;
            result = self.merge(result, own);
        }

        let superclasses = self.hierarchy.superclasses_of(ty);
        if inheritance.include_superclasses {
            for superclass in &superclasses {
                let found = self.attributes_for(
                    &target.visiting(superclass.clone(), ResolutionPhase::FromParentClass),
                )?;
                result = self.merge(result, found);
            }
        }

        if inheritance.include_interfaces {
            let mut visited = HashSet::new();
            result = self.metadata_from_interfaces(
                target,
                ty,
                ResolutionPhase::FromParentClass,
                result,
                &mut visited,
            )?;
            if inheritance.include_superclasses {
                for superclass in &superclasses {
                    result = self.metadata_from_interfaces(
                        target,
                        superclass,
                        ResolutionPhase::FromParentClass,
                        result,
                        &mut visited,
                    )?;
                }
            }
        }

        result = self.metadata_from_packages(target, result);

        Ok(self.flavor.clean(result, ElementKind::Type))
    }

    /// Merge metadata from the interfaces of `start`, direct interfaces
    /// before their super-interfaces.
    fn metadata_from_interfaces(
        &self,
        target: &Target,
        start: &TypeName,
        phase: ResolutionPhase,
        mut result: Vec<F::Datum>,
        visited: &mut HashSet<TypeName>,
    ) -> Result<Vec<F::Datum>> {
        let mut frontier = self.hierarchy.interfaces_of(start);
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for interface in frontier {
                if !visited.insert(interface.clone()) {
                    continue;
                }
                next.extend(self.hierarchy.interfaces_of(&interface));
                let found = self.attributes_for(&target.visiting(interface, phase))?;
                result = self.merge(result, found);
            }
            frontier = next;
        }
        Ok(result)
    }

    /// Package-level metadata is not supported; the input is returned as is.
    fn metadata_from_packages(&self, target: &Target, result: Vec<F::Datum>) -> Vec<F::Datum> {
        if self.settings.inheritance.include_packages {
            log::trace!("Package metadata requested for {}; not collected", target);
        }
        result
    }

    /// Metadata declared at the position `target` points to, restricted to
    /// the configured kinds.
    fn attributes_for(&self, target: &Target) -> Result<Vec<F::Datum>> {
        let mismatch = || Error::mismatch(target.element(), target.phase());

        let found = match target.phase() {
            ResolutionPhase::FromTarget => {
                let method = target.element().as_method().ok_or_else(mismatch)?;
                self.source.method_metadata(method)
            }
            ResolutionPhase::FromClass => {
                let ty = target.element().as_type().ok_or_else(mismatch)?;
                self.source.type_metadata(ty)
            }
            ResolutionPhase::FromParentClass => {
                let parent = target.parent().ok_or_else(mismatch)?;
                self.source.type_metadata(parent)
            }
            ResolutionPhase::FromParentTarget => {
                let method = target.element().as_method().ok_or_else(mismatch)?;
                let parent = target.parent().ok_or_else(mismatch)?;
                match self.hierarchy.declared_method(parent, &method.signature) {
                    Some(declared) => self.source.method_metadata(&declared),
                    None => Vec::new(),
                }
            }
        };

        Ok(self.only_intercepted(found))
    }

    fn only_intercepted(&self, found: Vec<F::Datum>) -> Vec<F::Datum> {
        match &self.settings.intercepting_metadata {
            None => found,
            Some(kinds) => kinds
                .iter()
                .flat_map(|kind| {
                    found
                        .iter()
                        .filter(move |datum| self.flavor.is_kind(datum, kind))
                        .cloned()
                })
                .collect(),
        }
    }
}
