//! Generational metadata cache.
//!
//! Resolved collections are kept per [`CacheKey`] in a `DashMap`. The map
//! lives inside a [`Generation`] together with the settings it was computed
//! under. Changing settings never clears a map in place: a new generation is
//! swapped in under a write lock, and resolutions still running against the
//! old one finish into a map nobody reads anymore.

use crate::config::ResolutionSettings;
use crate::errors::Result;
use crate::hierarchy::{TargetElement, TypeName};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Identity of one resolution: the analysed type plus the target element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub declaring_type: TypeName,
    pub element: TargetElement,
}

impl CacheKey {
    pub fn new(declaring_type: TypeName, element: TargetElement) -> Self {
        Self {
            declaring_type,
            element,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.declaring_type, self.element)
    }
}

/// Cached outcome of a resolution.
///
/// Empty results are stored as `NoMetaData` so "computed, nothing found" is
/// distinguishable from "never computed".
#[derive(Debug, Clone)]
pub enum CachedMetaData<M> {
    Resolved(Arc<[M]>),
    NoMetaData,
}

impl<M> CachedMetaData<M> {
    fn from_resolved(metadata: Vec<M>) -> Self {
        if metadata.is_empty() {
            CachedMetaData::NoMetaData
        } else {
            CachedMetaData::Resolved(Arc::from(metadata))
        }
    }

    fn shared(&self) -> Arc<[M]> {
        match self {
            CachedMetaData::Resolved(metadata) => Arc::clone(metadata),
            CachedMetaData::NoMetaData => Arc::from(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CachedMetaData::NoMetaData)
    }
}

/// Settings plus everything resolved under them.
#[derive(Debug)]
pub struct Generation<M> {
    id: u64,
    settings: ResolutionSettings,
    entries: DashMap<CacheKey, CachedMetaData<M>>,
}

impl<M> Generation<M> {
    fn new(id: u64, settings: ResolutionSettings) -> Self {
        Self {
            id,
            settings,
            entries: DashMap::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn settings(&self) -> &ResolutionSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, key: &CacheKey) -> Option<CachedMetaData<M>>
    where
        M: Clone,
    {
        self.entries.get(key).map(|entry| entry.value().clone())
    }
}

/// `entries` counts the current generation only. `hits` and `misses` are
/// totals over the cache's lifetime and survive reconfiguration and
/// [`MetaDataCache::clear`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
    pub hit_rate: f64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache Stats: {} entries, {} hits, {} misses, {:.1}% hit rate",
            self.entries,
            self.hits,
            self.misses,
            self.hit_rate * 100.0
        )
    }
}

/// Thread-safe cache shared by every caller of one collector.
#[derive(Debug)]
pub struct MetaDataCache<M> {
    current: RwLock<Arc<Generation<M>>>,
    next_id: AtomicU64,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<M: Clone> MetaDataCache<M> {
    pub fn new(settings: ResolutionSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(Generation::new(0, settings))),
            next_id: AtomicU64::new(1),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the current generation. A resolution should take exactly
    /// one snapshot and use it throughout.
    pub fn generation(&self) -> Arc<Generation<M>> {
        Arc::clone(&self.current.read())
    }

    pub fn settings(&self) -> ResolutionSettings {
        self.current.read().settings.clone()
    }

    /// Swap in an empty generation with settings derived from the current
    /// ones. Read-modify-swap happens under one write lock.
    pub fn update_settings(&self, update: impl FnOnce(&mut ResolutionSettings)) {
        let mut current = self.current.write();
        let mut settings = current.settings.clone();
        update(&mut settings);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Replacing metadata cache generation {} ({} entries) with {}",
            current.id,
            current.len(),
            id
        );
        *current = Arc::new(Generation::new(id, settings));
    }

    /// Drop every cached result, keeping the settings.
    pub fn clear(&self) {
        self.update_settings(|_| {});
    }

    /// Return the cached collection for `key` in `generation`, computing and
    /// storing it on a miss.
    ///
    /// Concurrent misses on one key may both compute; the first insert wins
    /// and every caller gets that value.
    pub fn get_or_compute<F>(
        &self,
        generation: &Generation<M>,
        key: CacheKey,
        compute: F,
    ) -> Result<Arc<[M]>>
    where
        F: FnOnce(&ResolutionSettings) -> Result<Vec<M>>,
    {
        if let Some(cached) = generation.lookup(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("Metadata cache hit for {}", key);
            return Ok(cached.shared());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let resolved = CachedMetaData::from_resolved(compute(&generation.settings)?);
        let stored = generation
            .entries
            .entry(key)
            .or_insert(resolved)
            .value()
            .shared();
        Ok(stored)
    }

    /// Current entry count alongside lifetime hit and miss totals.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        CacheStats {
            entries: self.current.read().len(),
            hits,
            misses,
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
        }
    }
}
