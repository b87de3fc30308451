use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use text_canvas::TextCanvas;

/// Code points excluded from [`CharSet::reduced_unicode`]: the define and
/// arrow glyphs that many monospace fonts render poorly or not at all.
const REDUCED_EXCLUDED: [char; 8] = ['≔', '≕', '⇔', '↔', '⇒', '→', '⇐', '←'];

struct CharSetInner {
    filter: Box<dyn Fn(char) -> bool + Send + Sync>,
    cache: RwLock<FxHashMap<char, bool>>,
}

/// A character repertoire oracle: answers whether a code point or string is
/// representable in a target character set.
///
/// Results are memoized per code point, because the same glyphs are probed
/// repeatedly across a render pass. The cache is scoped to the oracle
/// instance (clones share it) and is safe to populate from concurrent
/// renders; correctness never depends on a cache hit.
#[derive(Clone)]
pub struct CharSet {
    inner: Arc<CharSetInner>,
}

impl CharSet {
    /// An oracle backed by an arbitrary predicate.
    pub fn of(filter: impl Fn(char) -> bool + Send + Sync + 'static) -> Self {
        CharSet {
            inner: Arc::new(CharSetInner {
                filter: Box::new(filter),
                cache: RwLock::new(FxHashMap::default()),
            }),
        }
    }

    /// Plain ASCII.
    pub fn ascii() -> Self {
        Self::of(|c| c.is_ascii())
    }

    /// Full Unicode: everything is representable.
    pub fn unicode() -> Self {
        Self::of(|_| true)
    }

    /// ISO 8859-1.
    pub fn latin1() -> Self {
        Self::of(|c| (c as u32) < 0x100)
    }

    /// Unicode without the define/arrow glyphs that common terminal fonts
    /// lack; see [`CharSet::reduced_unicode`]'s exclusion list.
    pub fn reduced_unicode() -> Self {
        Self::of(|c| !REDUCED_EXCLUDED.contains(&c))
    }

    /// An oracle that reports `true` only if both `a` and `b` do.
    pub fn intersection(a: &CharSet, b: &CharSet) -> Self {
        let (a, b) = (a.clone(), b.clone());
        Self::of(move |c| a.can_display_char(c) && b.can_display_char(c))
    }

    pub fn can_display_char(&self, c: char) -> bool {
        let cache = self
            .inner
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(&hit) = cache.get(&c) {
            return hit;
        }
        drop(cache);
        let result = (self.inner.filter)(c);
        self.inner
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(c, result);
        result
    }

    /// Whether every character of `s` is representable. Newlines count as
    /// representable (they are layout, not glyphs).
    pub fn can_display(&self, s: &str) -> bool {
        s.chars().all(|c| c == '\n' || self.can_display_char(c))
    }

    pub fn can_display_canvas(&self, canvas: &TextCanvas) -> bool {
        self.can_display(&canvas.to_string())
    }

    /// The common "use the nice glyph if representable" pattern.
    pub fn or_fallback<'a>(&self, preferred: &'a str, fallback: &'a str) -> &'a str {
        if self.can_display(preferred) {
            preferred
        } else {
            fallback
        }
    }

    pub fn or_fallback_char(&self, preferred: char, fallback: char) -> char {
        if self.can_display_char(preferred) {
            preferred
        } else {
            fallback
        }
    }

    pub fn or_fallback_canvas(&self, preferred: TextCanvas, fallback: TextCanvas) -> TextCanvas {
        if self.can_display_canvas(&preferred) {
            preferred
        } else {
            fallback
        }
    }
}

impl fmt::Debug for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CharSet")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_rejects_unicode_glyphs() {
        let cs = CharSet::ascii();
        assert!(cs.can_display("sqrt(x)"));
        assert!(!cs.can_display("√"));
        assert_eq!(cs.or_fallback("≤", "<="), "<=");
    }

    #[test]
    fn unicode_accepts_everything() {
        let cs = CharSet::unicode();
        assert!(cs.can_display("√≤⌠"));
        assert_eq!(cs.or_fallback("≤", "<="), "≤");
    }

    #[test]
    fn reduced_unicode_excludes_arrows() {
        let cs = CharSet::reduced_unicode();
        assert!(cs.can_display("√"));
        assert!(!cs.can_display("→"));
    }

    #[test]
    fn results_are_cached_per_instance() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let cs = CharSet::of(|_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            true
        });
        assert!(cs.can_display_char('x'));
        assert!(cs.can_display_char('x'));
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn intersection_requires_both() {
        let both = CharSet::intersection(&CharSet::latin1(), &CharSet::reduced_unicode());
        assert!(both.can_display_char('é'));
        assert!(!both.can_display_char('→'));
        assert!(!both.can_display_char('√'));
    }
}
