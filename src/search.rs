//! Free-text matching for locally filtered lists.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Case-insensitive matcher for free-text filter inputs.
///
/// A plain substring hit always matches. Otherwise the pattern is matched
/// fuzzily, so "jdoe" finds "John Doe".
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }

    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return true;
        }
        if text.to_lowercase().contains(&pattern.to_lowercase()) {
            return true;
        }
        self.inner.fuzzy_match(text, pattern).is_some()
    }
}
