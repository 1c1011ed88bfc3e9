// Export modules for library usage
pub mod advisor;
pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod errors;
pub mod hierarchy;
pub mod metadata;

// Re-export commonly used types
pub use crate::advisor::{
    AnnotationMetaDataAdvisor, GenericMetaDataAdvisor, GenericMetaDataAdvisorBuilder,
    MetaDataInterceptor,
};

pub use crate::collector::{
    AnnotationMetaDataCollector, CacheStats, GenericMetaDataCollector,
    InterfaceMetaDataCollector, ResolutionPhase, ResolutionRequest, Target,
};

pub use crate::config::{InheritanceConfiguration, MetaInheritConfig, ResolutionSettings};

pub use crate::errors::{Error, Result};

pub use crate::hierarchy::{
    ElementKind, MethodInvocation, MethodRef, MethodSignature, TargetElement, TypeHierarchy,
    TypeModel, TypeName,
};

pub use crate::metadata::{Annotation, AnnotationFlavor, MetaDataFlavor, MetaDataSource};
