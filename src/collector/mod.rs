//! Metadata collectors.
//!
//! - [`GenericMetaDataCollector`] resolves metadata with override semantics
//!   across the whole hierarchy and caches the results.
//! - [`InterfaceMetaDataCollector`] unions metadata from a declaration and
//!   the interfaces of its type, without precedence.

pub mod cache;
pub mod generic;
pub mod interfaces;
pub mod merge;
pub mod target;

pub use cache::{CacheKey, CacheStats, CachedMetaData, MetaDataCache};
pub use generic::{AnnotationMetaDataCollector, GenericMetaDataCollector, ResolutionRequest};
pub use interfaces::{InterfaceMetaDataCollector, InterfaceMetaDataCollectorBuilder};
pub use merge::{dedupe_by_kind, merge_by_hierarchy, union_distinct};
pub use target::{ResolutionPhase, Target};
