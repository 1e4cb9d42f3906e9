//! In-memory memoization for loaded content.
//!
//! Reading and parsing the article YAML files is cheap but not free, and a
//! full build asks for the article list once per generated page. In
//! production the [`ContentStore`](crate::content::ContentStore) therefore
//! keeps what it loaded in a [`ContentCache`]; in development the cache is
//! bypassed so edits to content files show up on the next call.
//!
//! # Design
//!
//! The cache is an explicit object owned by the content store rather than
//! process-wide state, so tests can build a store with either policy and
//! inspect its [`CacheStats`].
//!
//! - **List entry**: the full, already filtered and ordered article list.
//! - **Article entries**: full articles keyed by slug, filled on first lookup.
//!
//! There is no eviction. The number of articles is small and fixed by the
//! content directory; [`ContentCache::invalidate`] drops everything.
//!
//! Only successful loads are stored. A lookup that ends in `NotFound` is
//! repeated on the next call.

use crate::types::{Article, ArticleListItem};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Whether loaded content is kept between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep loaded content until [`ContentCache::invalidate`] (production).
    #[default]
    Memoize,
    /// Never store anything; every call re-reads the files (development).
    Bypass,
}

#[derive(Debug, Default)]
struct CacheState {
    list: Option<Vec<ArticleListItem>>,
    articles: HashMap<String, Article>,
    stats: CacheStats,
}

/// Memoized article list and full articles.
#[derive(Debug, Default)]
pub struct ContentCache {
    policy: CachePolicy,
    state: Mutex<CacheState>,
}

impl ContentCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// The cached article list, counting a hit or a miss.
    pub fn list(&self) -> Option<Vec<ArticleListItem>> {
        let mut state = self.lock();
        let cached = state.list.clone();
        state.stats.record(cached.is_some());
        cached
    }

    pub fn store_list(&self, items: &[ArticleListItem]) {
        if self.policy == CachePolicy::Memoize {
            self.lock().list = Some(items.to_vec());
        }
    }

    /// The cached full article for `slug`, counting a hit or a miss.
    pub fn article(&self, slug: &str) -> Option<Article> {
        let mut state = self.lock();
        let cached = state.articles.get(slug).cloned();
        state.stats.record(cached.is_some());
        cached
    }

    pub fn store_article(&self, article: &Article) {
        if self.policy == CachePolicy::Memoize {
            self.lock()
                .articles
                .insert(article.slug.clone(), article.clone());
        }
    }

    /// Drop every cached entry. Statistics are kept.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.list = None;
        state.articles.clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    // Content is plain data; a panic while holding the lock cannot leave it
    // half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lookup counters for a [`ContentCache`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} loaded ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} loaded", self.misses)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{article, list_item};

    #[test]
    fn memoize_returns_stored_list() {
        let cache = ContentCache::new(CachePolicy::Memoize);
        assert!(cache.list().is_none());

        cache.store_list(&[list_item("a", "A"), list_item("b", "B")]);
        let cached = cache.list().unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[1].slug, "b");
    }

    #[test]
    fn bypass_never_stores() {
        let cache = ContentCache::new(CachePolicy::Bypass);
        cache.store_list(&[list_item("a", "A")]);
        cache.store_article(&article("a", "A"));

        assert!(cache.list().is_none());
        assert!(cache.article("a").is_none());
    }

    #[test]
    fn articles_cached_by_slug() {
        let cache = ContentCache::new(CachePolicy::Memoize);
        cache.store_article(&article("first", "First"));

        assert_eq!(cache.article("first").unwrap().title.get(crate::types::Language::En), "First");
        assert!(cache.article("second").is_none());
    }

    #[test]
    fn invalidate_clears_entries() {
        let cache = ContentCache::new(CachePolicy::Memoize);
        cache.store_list(&[list_item("a", "A")]);
        cache.store_article(&article("a", "A"));

        cache.invalidate();

        assert!(cache.list().is_none());
        assert!(cache.article("a").is_none());
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let cache = ContentCache::new(CachePolicy::Memoize);
        cache.list();
        cache.store_list(&[]);
        cache.list();
        cache.list();

        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 1 });
    }

    #[test]
    fn default_policy_is_memoize() {
        assert_eq!(ContentCache::default().policy(), CachePolicy::Memoize);
    }

    #[test]
    fn stats_display_with_hits() {
        let s = CacheStats { hits: 5, misses: 2 };
        assert_eq!(format!("{}", s), "5 cached, 2 loaded (7 total)");
    }

    #[test]
    fn stats_display_without_hits() {
        let s = CacheStats { hits: 0, misses: 3 };
        assert_eq!(format!("{}", s), "3 loaded");
    }
}
