//! Bounded cache of compiled user patterns

use formlogic_common::AtomicCounter;
use moka::sync::Cache;
use regex::Regex;
use std::sync::Arc;
use tracing::warn;

/// Compiled `pattern` validations, keyed by source text
///
/// Patterns that fail to compile are cached as `None` so a broken schema
/// does not recompile (and warn) on every keystroke.
pub struct PatternCache {
    cache: Cache<String, Option<Arc<Regex>>>,
    capacity: u64,
    hits: AtomicCounter,
    misses: AtomicCounter,
}

impl PatternCache {
    /// Create cache with capacity
    pub fn new(capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(capacity).build();

        Self {
            cache,
            capacity,
            hits: AtomicCounter::new(0),
            misses: AtomicCounter::new(0),
        }
    }

    /// Compiled regex for `pattern`, `None` if it does not compile
    pub fn get_or_compile(&self, pattern: &str) -> Option<Arc<Regex>> {
        if let Some(compiled) = self.cache.get(pattern) {
            self.hits.inc();
            return compiled;
        }

        self.misses.inc();
        let compiled = match Regex::new(pattern) {
            Ok(re) => Some(Arc::new(re)),
            Err(e) => {
                warn!(pattern, error = %e, "invalid regex pattern");
                None
            }
        };
        self.cache.insert(pattern.to_string(), compiled.clone());
        compiled
    }

    /// Whether `value` matches `pattern`; an invalid pattern never matches
    pub fn is_match(&self, pattern: &str, value: &str) -> bool {
        self.get_or_compile(pattern)
            .map(|re| re.is_match(value))
            .unwrap_or(false)
    }

    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    pub fn misses(&self) -> u64 {
        self.misses.get()
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Clear cache
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Get current size (eventually consistent)
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCache")
            .field("capacity", &self.capacity)
            .field("hits", &self.hits.get())
            .field("misses", &self.misses.get())
            .finish()
    }
}
