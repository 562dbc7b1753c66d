// Copyright (C) 2009 The Libphonenumber Authors
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

use log::error;

use super::regex_util::{CachedMatch, RegexConsume};
use crate::{
    interfaces,
    metadata::PhoneNumberDesc,
    regexp_cache::{InvalidRegexError, RegexCache},
};

/// [`MatcherApi`](interfaces::MatcherApi) backed by the shared regex cache.
pub(crate) struct RegexBasedMatcher {
    cache: Arc<RegexCache>,
}

impl RegexBasedMatcher {
    pub fn new(cache: Arc<RegexCache>) -> Self {
        Self { cache }
    }

    fn match_number(
        &self,
        phone_number: &str,
        number_pattern: &str,
        allow_prefix_match: bool,
    ) -> Result<bool, InvalidRegexError> {
        if allow_prefix_match {
            Ok(self.cache.prefix_regex(number_pattern)?.matches_start(phone_number))
        } else {
            self.cache.full_match(number_pattern, phone_number)
        }
    }
}

impl interfaces::MatcherApi for RegexBasedMatcher {
    fn match_national_number(
        &self,
        number: &str,
        number_desc: &PhoneNumberDesc,
        allow_prefix_match: bool,
    ) -> bool {
        let national_number_pattern = number_desc.national_number_pattern();
        // We don't want to consider it a prefix match when matching non-empty input
        // against an empty pattern.
        if national_number_pattern.is_empty() {
            return false;
        }
        match self.match_number(number, national_number_pattern, allow_prefix_match) {
            Ok(matched) => matched,
            Err(err) => {
                error!("Invalid regex! {}: {}", national_number_pattern, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::RegexBasedMatcher;
    use crate::{interfaces::MatcherApi, metadata::PhoneNumberDesc, regexp_cache::RegexCache};

    #[test]
    fn empty_pattern_never_matches() {
        let matcher = RegexBasedMatcher::new(Arc::new(RegexCache::new()));
        let desc = PhoneNumberDesc::default();
        assert!(!matcher.match_national_number("", &desc, true));
        assert!(!matcher.match_national_number("123", &desc, false));
    }

    #[test]
    fn prefix_and_full_matching() {
        let matcher = RegexBasedMatcher::new(Arc::new(RegexCache::new()));
        let desc = PhoneNumberDesc::new("4\\d{3}", &[4]);
        assert!(matcher.match_national_number("4123", &desc, false));
        assert!(!matcher.match_national_number("41234", &desc, false));
        assert!(matcher.match_national_number("41234", &desc, true));
        assert!(!matcher.match_national_number("5123", &desc, true));
    }

    #[test]
    fn invalid_pattern_is_reported_as_no_match() {
        let matcher = RegexBasedMatcher::new(Arc::new(RegexCache::new()));
        let desc = PhoneNumberDesc::new("4(\\d", &[4]);
        assert!(!matcher.match_national_number("4123", &desc, false));
    }
}
