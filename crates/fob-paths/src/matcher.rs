//! Request matching
//!
//! Selects the single best matcher for a specifier:
//!
//! - an exact (non-wildcard) pattern equal to the specifier wins outright and
//!   ends the search, whatever was declared before or after it;
//! - otherwise the wildcard pattern with the longest prefix wins, and the
//!   earliest declared pattern wins a tie.

use crate::pattern::CompiledMatcher;

/// A selected matcher together with the text its wildcard captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'m, 's> {
    /// The winning matcher
    pub matcher: &'m CompiledMatcher,
    /// Text between the matcher's prefix and suffix (empty for exact matches)
    pub capture: &'s str,
}

impl CompiledMatcher {
    /// Whether `specifier` matches this pattern
    pub fn matches(&self, specifier: &str) -> bool {
        if self.has_wildcard() {
            specifier.len() >= self.prefix().len() + self.suffix().len()
                && specifier.starts_with(self.prefix())
                && specifier.ends_with(self.suffix())
        } else {
            specifier == self.raw()
        }
    }
}

/// Find the best matcher for `specifier`, or `None` if nothing matches
pub fn match_request<'m, 's>(
    matchers: &'m [CompiledMatcher],
    specifier: &'s str,
) -> Option<MatchResult<'m, 's>> {
    let mut best: Option<&'m CompiledMatcher> = None;

    for matcher in matchers {
        if !matcher.matches(specifier) {
            continue;
        }

        if !matcher.has_wildcard() {
            return Some(MatchResult {
                matcher,
                capture: "",
            });
        }

        // Strictly longer only: equal prefixes keep the earlier declaration.
        if best.is_none_or(|current| matcher.prefix().len() > current.prefix().len()) {
            best = Some(matcher);
        }
    }

    best.map(|matcher| MatchResult {
        matcher,
        capture: &specifier[matcher.prefix().len()..specifier.len() - matcher.suffix().len()],
    })
}
