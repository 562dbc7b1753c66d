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

use std::{num::NonZeroUsize, sync::Arc};

use log::trace;
use lru::LruCache;
use parking_lot::Mutex;
use regex::Regex;
use thiserror::Error;

pub const DEFAULT_REGEX_CACHE_CAPACITY: usize = 128;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// Bounded map from pattern string to compiled [`Regex`].
///
/// Lookups and insertions both count as a touch; once the cache is full the
/// least recently touched pattern is evicted. Compiled regexes are handed out
/// as `Arc`s, so an evicted pattern stays usable by whoever still holds it.
pub struct RegexCache {
    cache: Mutex<LruCache<String, Arc<Regex>>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_REGEX_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        if let Some(regex) = self.cache.lock().get(pattern) {
            return Ok(regex.clone());
        }
        // Compile outside of the lock, a slow pattern must not stall readers.
        let compiled = Arc::new(Regex::new(pattern)?);

        let mut cache = self.cache.lock();
        // Another thread may have inserted the same pattern meanwhile; keep
        // the first one so only one compiled copy is ever live in the cache.
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.clone());
        }
        if let Some((evicted, _)) = cache.push(pattern.to_owned(), compiled.clone()) {
            trace!("Evicted regex '{}' from cache", evicted);
        }
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cache.lock().cap().get()
    }

    /// Whether `pattern` is currently cached. Does not count as a touch.
    pub fn contains(&self, pattern: &str) -> bool {
        self.cache.lock().contains(pattern)
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::RegexCache;

    #[test]
    fn returns_same_instance_for_same_pattern() {
        let cache = RegexCache::with_capacity(4);
        let first = cache.get_regex("\\d{3}").unwrap();
        let second = cache.get_regex("\\d{3}").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(1, cache.len());
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = RegexCache::with_capacity(2);
        cache.get_regex("a").unwrap();
        cache.get_regex("b").unwrap();
        cache.get_regex("c").unwrap();

        assert_eq!(2, cache.len());
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn hit_protects_entry_from_next_eviction() {
        let cache = RegexCache::with_capacity(2);
        cache.get_regex("a").unwrap();
        cache.get_regex("b").unwrap();
        // touch "a", so "b" becomes the oldest
        cache.get_regex("a").unwrap();
        cache.get_regex("c").unwrap();

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn invalid_pattern_is_not_cached() {
        let cache = RegexCache::with_capacity(2);
        assert!(cache.get_regex("(unclosed").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let cache = RegexCache::with_capacity(0);
        assert_eq!(1, cache.capacity());
        cache.get_regex("x").unwrap();
        cache.get_regex("y").unwrap();
        assert_eq!(1, cache.len());
    }

    #[test]
    fn shared_between_threads() {
        let cache = Arc::new(RegexCache::with_capacity(8));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        let regex = cache.get_regex("[0-9]+").unwrap();
                        assert!(regex.is_match(&i.to_string()));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(1, cache.len());
    }
}
