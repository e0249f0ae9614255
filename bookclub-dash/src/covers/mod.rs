//! Cover lookup
//!
//! Resolves a (title, author) pair to a cover image URL through an external
//! metadata service. Every result, including "no cover", is memoized for the
//! lifetime of the `CoverLookup` that owns the cache. There is no expiry and
//! no retry: a key that failed once stays without a cover until restart.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::error::Result;

mod google_books;

pub use google_books::{GoogleBooksClient, GOOGLE_BOOKS_BASE_URL};

/// Joins title and author in cache keys
pub const CACHE_KEY_SEPARATOR: &str = "-";

/// Image references attached to a volume
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub small_thumbnail: Option<String>,
}

impl ImageLinks {
    /// Larger thumbnail when present, otherwise the small one
    pub fn best(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.small_thumbnail.as_deref().filter(|u| !u.is_empty()))
    }
}

/// External book metadata search
#[async_trait]
pub trait CoverSource: Send + Sync {
    /// Image links of the first result for a free-text query
    async fn search(&self, query: &str) -> Result<Option<ImageLinks>>;
}

/// Bump the zoom level and force https
///
/// Only the first occurrence of each pattern is rewritten.
pub fn upgrade_image_url(url: &str) -> String {
    url.replacen("zoom=1", "zoom=2", 1)
        .replacen("http://", "https://", 1)
}

/// Process-lifetime memo table keyed by `title-author`
///
/// Keys are the exact concatenation, with no case or whitespace
/// normalization. Concurrent lookups for the same key both write; the last
/// write wins.
#[derive(Debug, Default)]
pub struct CoverCache {
    entries: Mutex<HashMap<String, Option<String>>>,
}

impl CoverCache {
    pub fn key(title: &str, author: &str) -> String {
        format!("{}{}{}", title, CACHE_KEY_SEPARATOR, author)
    }

    /// `Some(result)` on a hit, where `result` may itself be "no cover"
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: String, cover: Option<String>) {
        self.lock().insert(key, cover);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Option<String>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Cover resolver owning its memo table
pub struct CoverLookup {
    source: Arc<dyn CoverSource>,
    cache: CoverCache,
}

impl CoverLookup {
    pub fn new(source: Arc<dyn CoverSource>) -> Self {
        Self {
            source,
            cache: CoverCache::default(),
        }
    }

    pub fn cache(&self) -> &CoverCache {
        &self.cache
    }

    /// Cover image URL for a book, or `None` when no cover is available
    ///
    /// Empty titles or authors short-circuit without touching the cache.
    /// Errors from the source are logged and cached as "no cover".
    pub async fn lookup(&self, title: &str, author: &str) -> Option<String> {
        if title.is_empty() || author.is_empty() {
            return None;
        }

        let key = CoverCache::key(title, author);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let query = format!("{} {}", title, author);
        let cover = match self.source.search(&query).await {
            Ok(links) => links
                .as_ref()
                .and_then(ImageLinks::best)
                .map(upgrade_image_url),
            Err(e) => {
                warn!(title = %title, author = %author, "Error fetching book cover: {}", e);
                None
            }
        };

        if cover.is_none() {
            debug!(title = %title, author = %author, "No cover available");
        }

        self.cache.insert(key, cover.clone());
        cover
    }
}
