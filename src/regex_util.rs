// Copyright (C) 2025 Kashin Vladislav (Rust adaptation author)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use regex::{Captures, Match, Regex};

use crate::regexp_cache::{InvalidRegexError, RegexCache};

/// Matching anchored at the start of the input, the "looking at" operation
/// of other regex engines.
pub trait RegexConsume {
    fn matches_start(&self, s: &str) -> bool {
        self.find_start(s).is_some()
    }

    /// Returns the rest of `s` after a match anchored at its start.
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str> {
        self.find_start(s).map(|found| &s[found.end()..])
    }

    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>>;
    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>>;
}

impl RegexConsume for Regex {
    fn captures_start<'a>(&self, s: &'a str) -> Option<Captures<'a>> {
        let captures = self.captures(s)?;
        let full_capture = captures.get(0)?;
        if full_capture.start() != 0 {
            return None;
        }
        Some(captures)
    }

    fn find_start<'a>(&self, s: &'a str) -> Option<Match<'a>> {
        // leftmost-first: if any match starts at 0, the leftmost one does
        let found = self.find(s)?;
        if found.start() != 0 {
            return None;
        }
        Some(found)
    }
}

/// Wraps `pattern` so that it only matches the whole input.
pub fn full_match_pattern(pattern: &str) -> String {
    fast_cat::concat_str!("^(?:", pattern, ")$")
}

/// Wraps `pattern` so that it only matches at the start of the input.
pub fn prefix_match_pattern(pattern: &str) -> String {
    fast_cat::concat_str!("^(?:", pattern, ")")
}

/// Helpers resolving metadata patterns through a [`RegexCache`].
pub trait CachedMatch {
    fn full_match(&self, pattern: &str, s: &str) -> Result<bool, InvalidRegexError>;
    fn prefix_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError>;
}

impl CachedMatch for RegexCache {
    fn full_match(&self, pattern: &str, s: &str) -> Result<bool, InvalidRegexError> {
        Ok(self.get_regex(&full_match_pattern(pattern))?.is_match(s))
    }

    fn prefix_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        self.get_regex(&prefix_match_pattern(pattern))
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::{CachedMatch, RegexConsume};
    use crate::regexp_cache::RegexCache;

    #[test]
    fn full_match_needs_whole_input() {
        let cache = RegexCache::with_capacity(4);
        // an unanchored leftmost-first search would stop at "12"
        assert!(cache.full_match("\\d{2}|\\d{4}", "1234").unwrap());
        assert!(!cache.full_match("\\d{2}", "123").unwrap());
    }

    #[test]
    fn consume_start() {
        let regex = Regex::new("[+]+").unwrap();
        assert_eq!(Some("12"), regex.consume_start("++12"));
        assert_eq!(None, regex.consume_start("1+2"));
    }
}
