//! Compilation cache keyed by format string.
//!
//! Grids render many cells with the same handful of formats, so compiled
//! sections are memoized. A miss compiles outside the lock, so two threads
//! racing on the same key may both compile; the later insert wins.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use log::trace;
use lru::LruCache;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::compiled::CompiledFormat;
use crate::style::StyleMap;

/// Cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of distinct format strings kept.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 512 }
    }
}

/// A bounded LRU of compiled formats.
///
/// Entries are stored with an empty base style; [`compile`](Self::compile)
/// attaches the caller's base style to a shared copy.
#[derive(Debug)]
pub struct FormatCache {
    entries: Mutex<LruCache<String, CompiledFormat>>,
}

impl FormatCache {
    /// Creates a cache holding up to `capacity` formats (at least one).
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Compiles `raw`, reusing a cached parse when there is one.
    pub fn compile(&self, raw: &str, base_style: StyleMap) -> CompiledFormat {
        if let Ok(mut entries) = self.entries.lock() {
            if let Some(hit) = entries.get(raw) {
                trace!("format cache hit for {:?}", raw);
                return hit.rebased(base_style);
            }
        }

        let compiled = CompiledFormat::new(raw);
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(raw.to_string(), compiled.clone());
        }
        compiled.rebased(base_style)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains(raw))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .map(|e| e.cap().get())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Default for FormatCache {
    fn default() -> Self {
        Self::with_config(&CacheConfig::default())
    }
}

static GLOBAL_CACHE: Lazy<FormatCache> = Lazy::new(FormatCache::default);

/// The process-wide cache used by [`compile_cached`].
pub fn global_cache() -> &'static FormatCache {
    &GLOBAL_CACHE
}

/// Compiles through the process-wide cache.
pub fn compile_cached(raw: &str) -> CompiledFormat {
    GLOBAL_CACHE.compile(raw, StyleMap::new())
}
