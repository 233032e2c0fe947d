//! Lazily populated font cache.

use std::collections::HashMap;

use crate::metrics::{ApproximateMetrics, FontKey, FontMetrics, Metrics};

/// A resolved font: its key plus the values layout reads on every word.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub key: FontKey,
    pub metrics: Metrics,
    /// Width of a single space, used between words.
    pub space_width: f32,
}

/// Memoizes [`Font`]s per [`FontKey`] on top of a metrics provider.
///
/// Entries are created on first use and never evicted; the cache lives as
/// long as its owner.
pub struct FontCache {
    provider: Box<dyn FontMetrics>,
    fonts: HashMap<FontKey, Font>,
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new(ApproximateMetrics)
    }
}

impl FontCache {
    pub fn new(provider: impl FontMetrics + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            fonts: HashMap::new(),
        }
    }

    /// The font for `key`, resolving it on first request.
    pub fn get(&mut self, key: FontKey) -> Font {
        if let Some(font) = self.fonts.get(&key) {
            return *font;
        }
        log::debug!("font cache miss: {key}");
        let font = Font {
            key,
            metrics: self.provider.metrics(key),
            space_width: self.provider.measure(" ", key),
        };
        self.fonts.insert(key, font);
        font
    }

    /// Width of `text` in `key`. Measurements themselves are not cached.
    pub fn measure(&self, text: &str, key: FontKey) -> f32 {
        self.provider.measure(text, key)
    }

    /// Number of distinct fonts resolved so far.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FontStyle, FontWeight};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts `metrics` calls so cache hits can be observed.
    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl FontMetrics for Counting {
        fn measure(&self, text: &str, font: FontKey) -> f32 {
            ApproximateMetrics.measure(text, font)
        }

        fn metrics(&self, font: FontKey) -> Metrics {
            self.calls.set(self.calls.get() + 1);
            ApproximateMetrics.metrics(font)
        }
    }

    #[test]
    fn resolves_each_key_once() {
        let calls = Rc::new(Cell::new(0));
        let mut cache = FontCache::new(Counting {
            calls: Rc::clone(&calls),
        });
        assert!(cache.is_empty());

        let key = FontKey::default();
        let first = cache.get(key);
        let second = cache.get(key);
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);

        cache.get(FontKey::new(12, FontWeight::Bold, FontStyle::Roman));
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn space_width_comes_from_provider() {
        let mut cache = FontCache::default();
        let font = cache.get(FontKey::default());
        assert_eq!(font.space_width, cache.measure(" ", FontKey::default()));
        assert!(font.space_width > 0.0);
    }
}
