//! Byte-budgeted LRU cache of resolved templates.
//!
//! Entries are keyed by (source key, language, plural category) and hold the
//! template chosen for that bucket, before argument substitution. The cache
//! tracks its size as the sum of each entry's key and template byte lengths
//! and evicts least-recently-used entries to stay within `max_size_bytes`.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use lru::LruCache;
use serde::Serialize;
use tracing::{debug, trace};

use crate::locale::Language;
use crate::plural::PluralCategory;
use crate::types::SourceKey;

/// Default budget: 8192 KiB.
pub const DEFAULT_MAX_SIZE_BYTES: usize = 8192 * 1024;

/// Identity of a cached template.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CacheKey {
    pub source: SourceKey,
    pub language: Language,
    pub category: PluralCategory,
}

impl CacheKey {
    pub fn new(source: impl Into<SourceKey>, language: Language, category: PluralCategory) -> Self {
        Self {
            source: source.into(),
            language,
            category,
        }
    }
}

/// Where a cached template was resolved from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TemplateOrigin {
    /// The key's own language had a translation.
    Active,
    /// Resolved through the base language.
    Base,
    /// No translation anywhere; the literal key or caller default.
    Fallback,
}

/// A template as stored in the cache.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CachedTemplate {
    pub text: String,
    pub origin: TemplateOrigin,
}

impl CachedTemplate {
    pub fn new(text: impl Into<String>, origin: TemplateOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}

/// Size of an entry: UTF-8 bytes of the source key plus the template.
pub fn measure(key: &CacheKey, template: &CachedTemplate) -> usize {
    key.source.byte_len() + template.text.len()
}

/// Point-in-time cache statistics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_size_bytes: usize,
    pub max_size_bytes: usize,
    pub total_hits: u64,
    pub total_queries: u64,
}

impl CacheStats {
    /// `total_hits / total_queries`, or 0 before the first query.
    pub fn hit_ratio(&self) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            self.total_hits as f64 / self.total_queries as f64
        }
    }
}

/// Observer notified when an insertion had to evict entries.
///
/// Called once per [`TranslationCache::put`] that evicted at least one entry,
/// after the new entry is stored. Closures taking `&CacheStats` implement it.
pub trait CacheMonitor: Send {
    fn on_full_cache(&mut self, stats: &CacheStats);
}

impl<F> CacheMonitor for F
where
    F: FnMut(&CacheStats) + Send,
{
    fn on_full_cache(&mut self, stats: &CacheStats) {
        self(stats);
    }
}

/// The bounded translation cache.
///
/// # Example
///
/// ```
/// use tongue::{CacheKey, CachedTemplate, Language, PluralCategory, TemplateOrigin, TranslationCache};
///
/// let en = Language::parse("en").unwrap();
/// let mut cache = TranslationCache::new(1024);
/// let key = CacheKey::new("abcde", en, PluralCategory::Other);
///
/// assert!(cache.get(&key).is_none());
/// cache.put(key.clone(), CachedTemplate::new("abcde", TemplateOrigin::Fallback));
/// assert_eq!(cache.get(&key).map(|t| t.text.as_str()), Some("abcde"));
///
/// let stats = cache.stats();
/// assert_eq!(stats.entry_count, 1);
/// assert_eq!(stats.total_size_bytes, 10);
/// assert_eq!((stats.total_hits, stats.total_queries), (1, 2));
/// ```
pub struct TranslationCache {
    entries: LruCache<CacheKey, CachedTemplate>,
    max_size_bytes: usize,
    total_size_bytes: usize,
    total_hits: u64,
    total_queries: u64,
    monitor: Option<Box<dyn CacheMonitor>>,
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE_BYTES)
    }
}

impl Debug for TranslationCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TranslationCache")
            .field("stats", &self.stats())
            .field("has_monitor", &self.monitor.is_some())
            .finish_non_exhaustive()
    }
}

impl TranslationCache {
    pub fn new(max_size_bytes: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            max_size_bytes,
            total_size_bytes: 0,
            total_hits: 0,
            total_queries: 0,
            monitor: None,
        }
    }

    /// Look up a template. Counts a query, and a hit when present; a hit
    /// also marks the entry most recently used.
    pub fn get(&mut self, key: &CacheKey) -> Option<&CachedTemplate> {
        self.total_queries += 1;
        let found = self.entries.get(key);
        if found.is_some() {
            self.total_hits += 1;
            trace!(key = %key.source, language = %key.language, category = %key.category, "cache hit");
        } else {
            trace!(key = %key.source, language = %key.language, category = %key.category, "cache miss");
        }
        found
    }

    /// Look up a template without touching statistics or recency.
    pub fn peek(&self, key: &CacheKey) -> Option<&CachedTemplate> {
        self.entries.peek(key)
    }

    /// Store a template, evicting least-recently-used entries until it fits.
    ///
    /// The entry is stored even if it alone exceeds the budget. The monitor
    /// fires once if anything was evicted.
    pub fn put(&mut self, key: CacheKey, template: CachedTemplate) {
        let entry_size = measure(&key, &template);

        if let Some(existing) = self.entries.peek(&key) {
            let old_size = measure(&key, existing);
            self.entries.put(key, template);
            self.total_size_bytes = self.total_size_bytes - old_size + entry_size;
            return;
        }

        let mut evicted = 0usize;
        while self.total_size_bytes + entry_size > self.max_size_bytes {
            let Some((old_key, old_template)) = self.entries.pop_lru() else {
                break;
            };
            self.total_size_bytes -= measure(&old_key, &old_template);
            evicted += 1;
        }

        self.entries.put(key, template);
        self.total_size_bytes += entry_size;

        if evicted > 0 {
            debug!(
                evicted,
                entry_size,
                total_size_bytes = self.total_size_bytes,
                max_size_bytes = self.max_size_bytes,
                "cache full, evicted entries"
            );
            self.notify_full();
        }
    }

    /// Drop every category cached for `(source, language)`. Returns the
    /// number of entries removed.
    pub fn invalidate_source(&mut self, source: &SourceKey, language: Language) -> usize {
        let removed =
            self.remove_where(|key, _| key.source == *source && key.language == language);
        debug!(key = %source, %language, removed, "invalidated cached templates");
        removed
    }

    /// Drop entries for `source`, in any language, that were not resolved
    /// from their own language's translation.
    pub fn invalidate_fallbacks(&mut self, source: &SourceKey) -> usize {
        let removed = self.remove_where(|key, template| {
            key.source == *source && template.origin != TemplateOrigin::Active
        });
        debug!(key = %source, removed, "invalidated fallback templates");
        removed
    }

    /// Remove all entries and zero the statistics. The budget and monitor
    /// are kept.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.total_size_bytes = 0;
        self.total_hits = 0;
        self.total_queries = 0;
    }

    /// Change the budget. Applies on the next insertion.
    pub fn set_max_size_bytes(&mut self, max_size_bytes: usize) {
        self.max_size_bytes = max_size_bytes;
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    pub fn set_monitor(&mut self, monitor: impl CacheMonitor + 'static) {
        self.monitor = Some(Box::new(monitor));
    }

    /// Stop notifications.
    pub fn clear_monitor(&mut self) {
        self.monitor = None;
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn total_size_bytes(&self) -> usize {
        self.total_size_bytes
    }

    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn hit_ratio(&self) -> f64 {
        self.stats().hit_ratio()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len(),
            total_size_bytes: self.total_size_bytes,
            max_size_bytes: self.max_size_bytes,
            total_hits: self.total_hits,
            total_queries: self.total_queries,
        }
    }

    fn remove_where(&mut self, matches: impl Fn(&CacheKey, &CachedTemplate) -> bool) -> usize {
        let doomed: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(key, template)| matches(key, template))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            if let Some(template) = self.entries.pop(key) {
                self.total_size_bytes -= measure(key, &template);
            }
        }
        doomed.len()
    }

    fn notify_full(&mut self) {
        let stats = self.stats();
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.on_full_cache(&stats);
        }
    }
}
