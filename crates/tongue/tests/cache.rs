//! Integration tests for the byte-budgeted translation cache

use std::sync::{Arc, Mutex};

use tongue::{
    CacheKey, CacheStats, CachedTemplate, Language, PluralCategory, SourceKey, TemplateOrigin,
    TranslationCache,
};

fn en() -> Language {
    Language::parse("en").unwrap()
}

fn key(source: &str) -> CacheKey {
    CacheKey::new(source, en(), PluralCategory::Other)
}

fn literal(text: &str) -> CachedTemplate {
    CachedTemplate::new(text, TemplateOrigin::Fallback)
}

fn recording_monitor(cache: &mut TranslationCache) -> Arc<Mutex<Vec<CacheStats>>> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    cache.set_monitor(move |stats: &CacheStats| sink.lock().unwrap().push(*stats));
    calls
}

// =============================================================================
// Accounting
// =============================================================================

#[test]
fn test_size_is_key_plus_template_bytes() {
    let mut cache = TranslationCache::new(1024);
    cache.put(key("abcde"), literal("abcde"));
    cache.put(key("I have %d files"), literal("I have %d files"));
    assert_eq!(cache.entry_count(), 2);
    assert_eq!(cache.total_size_bytes(), 10 + 30);
}

#[test]
fn test_size_counts_utf8_bytes() {
    let mut cache = TranslationCache::new(1024);
    let he = Language::parse("he").unwrap();
    cache.put(
        CacheKey::new("And now in Hebrew", he, PluralCategory::Other),
        CachedTemplate::new("ועכשיו בעברית", TemplateOrigin::Active),
    );
    assert_eq!(cache.total_size_bytes(), 17 + 25);
}

#[test]
fn test_hits_and_queries() {
    let mut cache = TranslationCache::new(1024);
    assert!(cache.get(&key("a")).is_none());
    cache.put(key("a"), literal("a"));
    assert!(cache.get(&key("a")).is_some());
    assert!(cache.get(&key("a")).is_some());
    assert_eq!(cache.total_queries(), 3);
    assert_eq!(cache.total_hits(), 2);
    assert!((cache.hit_ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_hit_ratio_before_any_query() {
    assert_eq!(TranslationCache::new(10).hit_ratio(), 0.0);
}

#[test]
fn test_categories_are_separate_entries() {
    let mut cache = TranslationCache::new(1024);
    cache.put(CacheKey::new("%d dogs", en(), PluralCategory::One), literal("%d dog"));
    cache.put(CacheKey::new("%d dogs", en(), PluralCategory::Other), literal("%d dogs"));
    assert_eq!(cache.entry_count(), 2);
}

// =============================================================================
// Eviction
// =============================================================================

#[test]
fn test_least_recently_used_is_evicted_first() {
    let mut cache = TranslationCache::new(20);
    cache.put(key("aaaaa"), literal("aaaaa"));
    cache.put(key("bbbbb"), literal("bbbbb"));
    cache.put(key("ccccc"), literal("ccccc"));

    assert!(cache.peek(&key("aaaaa")).is_none());
    assert!(cache.peek(&key("bbbbb")).is_some());
    assert!(cache.peek(&key("ccccc")).is_some());
    assert_eq!(cache.total_size_bytes(), 20);
}

#[test]
fn test_oversized_entry_is_still_stored() {
    let mut cache = TranslationCache::new(4);
    cache.put(key("abcde"), literal("abcde"));
    assert_eq!(cache.entry_count(), 1);
    assert_eq!(cache.total_size_bytes(), 10);

    cache.put(key("xy"), literal("xy"));
    assert_eq!(cache.entry_count(), 1);
    assert!(cache.peek(&key("xy")).is_some());
}

#[test]
fn test_lowering_budget_applies_on_next_insert() {
    let mut cache = TranslationCache::new(1024);
    for source in ["aa", "bb", "cc", "dd"] {
        cache.put(key(source), literal(source));
    }
    cache.set_max_size_bytes(8);
    assert_eq!(cache.entry_count(), 4);

    cache.put(key("ee"), literal("ee"));
    assert_eq!(cache.entry_count(), 2);
    assert!(cache.total_size_bytes() <= 8);
}

// =============================================================================
// Monitor
// =============================================================================

#[test]
fn test_monitor_fires_once_per_evicting_insert() {
    let mut cache = TranslationCache::new(12);
    let calls = recording_monitor(&mut cache);

    cache.put(key("aa"), literal("aa"));
    cache.put(key("bb"), literal("bb"));
    cache.put(key("cc"), literal("cc"));
    assert!(calls.lock().unwrap().is_empty());

    cache.put(key("dddddd"), literal("dddddd"));
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].entry_count, 1);
    assert_eq!(calls[0].total_size_bytes, 12);
    assert_eq!(calls[0].max_size_bytes, 12);
}

#[test]
fn test_monitor_never_fires_on_get() {
    let mut cache = TranslationCache::new(0);
    let calls = recording_monitor(&mut cache);
    cache.put(key("a"), literal("a"));
    assert!(cache.get(&key("a")).is_some());
    assert!(cache.get(&key("b")).is_none());
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_cleared_monitor_is_silent() {
    let mut cache = TranslationCache::new(0);
    let calls = recording_monitor(&mut cache);
    cache.clear_monitor();
    cache.put(key("a"), literal("a"));
    cache.put(key("b"), literal("b"));
    assert!(calls.lock().unwrap().is_empty());
}

// =============================================================================
// Invalidation and Reset
// =============================================================================

#[test]
fn test_invalidate_source_drops_every_category() {
    let mut cache = TranslationCache::new(1024);
    let he = Language::parse("he").unwrap();
    cache.put(CacheKey::new("%d dogs", en(), PluralCategory::One), literal("x"));
    cache.put(CacheKey::new("%d dogs", en(), PluralCategory::Other), literal("y"));
    cache.put(CacheKey::new("%d dogs", he, PluralCategory::Other), literal("z"));

    let removed = cache.invalidate_source(&SourceKey::new("%d dogs"), en());
    assert_eq!(removed, 2);
    assert_eq!(cache.entry_count(), 1);
    assert_eq!(cache.total_size_bytes(), 8);
}

#[test]
fn test_invalidate_fallbacks_keeps_own_translations() {
    let mut cache = TranslationCache::new(1024);
    let he = Language::parse("he").unwrap();
    let it = Language::parse("it").unwrap();
    cache.put(
        CacheKey::new("hello", he, PluralCategory::Other),
        CachedTemplate::new("שלום", TemplateOrigin::Active),
    );
    cache.put(
        CacheKey::new("hello", it, PluralCategory::Other),
        CachedTemplate::new("hello", TemplateOrigin::Fallback),
    );
    cache.put(
        CacheKey::new("hello", en(), PluralCategory::Other),
        CachedTemplate::new("hi", TemplateOrigin::Base),
    );

    assert_eq!(cache.invalidate_fallbacks(&SourceKey::new("hello")), 2);
    assert!(cache.peek(&CacheKey::new("hello", he, PluralCategory::Other)).is_some());
}

#[test]
fn test_reset_keeps_budget_and_monitor() {
    let mut cache = TranslationCache::new(12);
    let calls = recording_monitor(&mut cache);
    cache.put(key("aaa"), literal("aaa"));
    assert!(cache.get(&key("aaa")).is_some());

    cache.reset();
    assert_eq!(
        cache.stats(),
        CacheStats {
            entry_count: 0,
            total_size_bytes: 0,
            max_size_bytes: 12,
            total_hits: 0,
            total_queries: 0,
        }
    );

    cache.put(key("aaa"), literal("aaa"));
    cache.put(key("bbb"), literal("bbb"));
    cache.put(key("ccc"), literal("ccc"));
    assert_eq!(calls.lock().unwrap().len(), 1);
}
