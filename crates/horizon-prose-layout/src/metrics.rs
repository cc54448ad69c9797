//! Font metrics acquisition.
//!
//! Layout never loads fonts itself. It asks a [`FontMetricsProvider`] for
//! the extent of a piece of text in a given font. [`FixedAdvanceMetrics`] is
//! a deterministic provider for terminals, tests and headless use;
//! [`CachingMetrics`] memoizes an expensive provider in a bounded LRU cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_prose_text::{Font, FontDef, FontFamily, FontStyle, FontWeight};
use parking_lot::Mutex;
use unicode_segmentation::UnicodeSegmentation;

/// The measured extent of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f32,
    /// Line height.
    pub height: f32,
    /// Distance from the top of the line to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line.
    pub descent: f32,
    /// Lowest extent of the glyphs relative to the baseline (negative below).
    pub y_min: f32,
}

impl TextMetrics {
    pub fn new(width: f32, height: f32, ascent: f32, descent: f32, y_min: f32) -> Self {
        Self {
            width,
            height,
            ascent,
            descent,
            y_min,
        }
    }
}

/// Supplies text measurements for layout.
pub trait FontMetricsProvider {
    /// Measure `text` set in `font`.
    fn measure(&self, text: &str, font: &Font) -> TextMetrics;

    /// The font obtained by applying `delta` to `base`.
    fn derive_font(&self, base: &Font, delta: &FontDef) -> Font {
        delta.apply(base)
    }
}

impl<P: FontMetricsProvider + ?Sized> FontMetricsProvider for &P {
    fn measure(&self, text: &str, font: &Font) -> TextMetrics {
        (**self).measure(text, font)
    }

    fn derive_font(&self, base: &Font, delta: &FontDef) -> Font {
        (**self).derive_font(base, delta)
    }
}

/// Metrics where every grapheme cluster advances by the same fraction of the
/// font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    advance: f32,
    ascent: f32,
    descent: f32,
}

impl FixedAdvanceMetrics {
    /// All values are fractions of the font size.
    pub fn new(advance: f32, ascent: f32, descent: f32) -> Self {
        Self {
            advance,
            ascent,
            descent,
        }
    }

    pub fn advance(&self) -> f32 {
        self.advance
    }
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self::new(0.6, 0.8, 0.2)
    }
}

impl FontMetricsProvider for FixedAdvanceMetrics {
    fn measure(&self, text: &str, font: &Font) -> TextMetrics {
        let size = font.size();
        let count = text.graphemes(true).count() as f32;
        let ascent = self.ascent * size;
        let descent = self.descent * size;
        TextMetrics::new(count * self.advance * size, ascent + descent, ascent, descent, -descent)
    }
}

/// Character-grid metrics: one unit per grapheme and one unit per line,
/// whatever the font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellMetrics;

impl FontMetricsProvider for CellMetrics {
    fn measure(&self, text: &str, _font: &Font) -> TextMetrics {
        let count = text.graphemes(true).count() as f32;
        TextMetrics::new(count, 1.0, 1.0, 0.0, 0.0)
    }
}

/// The measurement-relevant part of a font.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    families: Vec<FontFamily>,
    size_bits: u32,
    weight: FontWeight,
    style: FontStyle,
}

impl FontKey {
    fn new(font: &Font) -> Self {
        Self {
            families: font.families().to_vec(),
            size_bits: font.size().to_bits(),
            weight: font.weight(),
            style: font.style(),
        }
    }
}

/// Default number of measurements kept by [`CachingMetrics::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// A cached measurement and the tick of its last use.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    metrics: TextMetrics,
    last_used: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<(FontKey, String), CacheEntry>,
    tick: u64,
}

impl CacheState {
    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Remove the least recently used entry.
    fn evict_lru(&mut self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());
        match oldest {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }
}

/// Wraps a provider and memoizes its measurements.
///
/// At most `capacity` measurements are kept; when full, the least recently
/// used one is evicted. Color and decorations do not affect metrics, so
/// fonts differing only in those share cache entries.
#[derive(Debug)]
pub struct CachingMetrics<P> {
    inner: P,
    capacity: usize,
    state: Mutex<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<P: FontMetricsProvider> CachingMetrics<P> {
    /// Cache up to [`DEFAULT_CACHE_CAPACITY`] measurements.
    pub fn new(inner: P) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Cache up to `capacity` measurements (at least one).
    pub fn with_capacity(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Maximum number of cached measurements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached measurements.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Drop all cached measurements and reset the statistics.
    pub fn clear(&self) {
        *self.state.lock() = CacheState::default();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> MetricsCacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        MetricsCacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits,
            misses,
            evictions: self.evictions.load(Ordering::Relaxed),
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }

    fn insert(&self, key: (FontKey, String), metrics: TextMetrics) {
        let mut state = self.state.lock();
        if !state.entries.contains_key(&key) {
            while state.entries.len() >= self.capacity && state.evict_lru() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        let last_used = state.next_tick();
        state.entries.insert(key, CacheEntry { metrics, last_used });
    }
}

impl<P: FontMetricsProvider> FontMetricsProvider for CachingMetrics<P> {
    fn measure(&self, text: &str, font: &Font) -> TextMetrics {
        let key = (FontKey::new(font), text.to_string());
        {
            let mut state = self.state.lock();
            let tick = state.next_tick();
            if let Some(entry) = state.entries.get_mut(&key) {
                entry.last_used = tick;
                self.hits.fetch_add(1, Ordering::Relaxed);
                return entry.metrics;
            }
        }

        // Measure without holding the lock; the provider may be slow.
        let metrics = self.inner.measure(text, font);
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.insert(key, metrics);
        metrics
    }

    fn derive_font(&self, base: &Font, delta: &FontDef) -> Font {
        self.inner.derive_font(base, delta)
    }
}

/// Statistics about a [`CachingMetrics`] cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsCacheStats {
    /// Number of cached measurements.
    pub entries: usize,
    /// Maximum number of cached measurements.
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped to stay within the capacity.
    pub evictions: u64,
    /// Hit rate (0.0 to 1.0).
    pub hit_rate: f64,
}

static_assertions::assert_impl_all!(FixedAdvanceMetrics: Send, Sync);
static_assertions::assert_impl_all!(CachingMetrics<FixedAdvanceMetrics>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_prose_text::Color;

    #[test]
    fn fixed_advance_scales_with_size() {
        let metrics = FixedAdvanceMetrics::default();
        let m = metrics.measure("abcde", &Font::new(FontFamily::Monospace, 10.0));
        assert!((m.width - 30.0).abs() < 1e-4);
        assert!((m.height - 10.0).abs() < 1e-4);
        assert!((m.ascent - 8.0).abs() < 1e-4);
        assert!((m.y_min + 2.0).abs() < 1e-4);
        assert_eq!(metrics.advance(), 0.6);
    }

    #[test]
    fn graphemes_count_once() {
        let metrics = CellMetrics;
        let font = Font::default();
        assert_eq!(metrics.measure("e\u{301}", &font).width, 1.0);
        assert_eq!(metrics.measure("", &font).width, 0.0);
        assert_eq!(metrics.measure("", &font).height, 1.0);
    }

    #[test]
    fn derive_font_applies_delta() {
        let metrics = FixedAdvanceMetrics::default();
        let font = metrics.derive_font(&Font::default(), &FontDef::new().bold(true));
        assert!(font.is_bold());
    }

    #[test]
    fn cache_hits_ignore_color() {
        let cache = CachingMetrics::new(FixedAdvanceMetrics::default());
        let black = Font::default();
        let red = black.with_color(Color::RED);

        let first = cache.measure("word", &black);
        let second = cache.measure("word", &red);
        assert_eq!(first, second);

        let stats = cache.stats();
        assert_eq!((stats.entries, stats.hits, stats.misses), (1, 1, 1));
        assert!((stats.hit_rate - 0.5).abs() < 1e-9);

        cache.measure("word", &black.with_size(20.0));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn cache_stays_within_capacity() {
        let cache = CachingMetrics::with_capacity(CellMetrics, 3);
        let font = Font::default();
        for i in 0..10 {
            cache.measure(&format!("word{i}"), &font);
            assert!(cache.len() <= 3);
        }

        let stats = cache.stats();
        assert_eq!((stats.entries, stats.capacity), (3, 3));
        assert_eq!((stats.misses, stats.evictions), (10, 7));
        assert_eq!(CachingMetrics::with_capacity(CellMetrics, 0).capacity(), 1);
        assert_eq!(CachingMetrics::new(CellMetrics).capacity(), DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let cache = CachingMetrics::with_capacity(CellMetrics, 2);
        let font = Font::default();
        cache.measure("a", &font);
        cache.measure("b", &font);
        cache.measure("a", &font);
        cache.measure("c", &font);

        // "b" was evicted; "a" is still cached.
        cache.measure("a", &font);
        assert_eq!(cache.stats().hits, 2);
        cache.measure("b", &font);
        assert_eq!(cache.stats().misses, 4);
        assert_eq!(cache.len(), 2);
    }
}
