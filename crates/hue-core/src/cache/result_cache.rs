// ── Name-keyed memo table ──
//
// Secondary lookups (behavior-script name -> script) go through here. A miss
// triggers one full inventory fetch that replaces the whole table, so stale
// names never survive a refresh.

use std::collections::HashMap;
use std::future::Future;

use tokio::sync::Mutex;
use tracing::{debug, trace};

/// A mutex-guarded `key -> value` table refreshed wholesale on miss.
///
/// The lock is held across the refresh, so concurrent misses wait for the
/// first caller's fetch instead of issuing their own.
pub struct ResultCache<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V> Default for ResultCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone> ResultCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, without refreshing.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Return the cached value for `key`, or run `refresh` and replace the
    /// entire table with its result before looking again.
    ///
    /// `Ok(None)` means the key is absent even after a refresh. On refresh
    /// failure the table is left untouched.
    pub async fn get_or_refresh<F, Fut, E>(&self, key: &str, refresh: F) -> Result<Option<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<(String, V)>, E>>,
    {
        let mut entries = self.entries.lock().await;
        if let Some(value) = entries.get(key) {
            trace!(key, "result cache hit");
            return Ok(Some(value.clone()));
        }

        debug!(key, "result cache miss, refreshing");
        let fresh = refresh().await?;
        entries.clear();
        entries.extend(fresh);

        Ok(entries.get(key).cloned())
    }

    /// All cached keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn pairs(items: &[(&str, u32)]) -> Vec<(String, u32)> {
        items.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
    }

    #[tokio::test]
    async fn hit_skips_refresh() {
        let cache = ResultCache::new();
        let calls = AtomicUsize::new(0);

        let first: Result<_, ()> = cache
            .get_or_refresh("a", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(pairs(&[("a", 1), ("b", 2)]))
            })
            .await;
        assert_eq!(first.unwrap(), Some(1));

        let second: Result<_, ()> = cache
            .get_or_refresh("b", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            })
            .await;
        assert_eq!(second.unwrap(), Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_replaces_every_entry() {
        let cache = ResultCache::new();

        let _: Result<_, ()> = cache
            .get_or_refresh("old", || async { Ok(pairs(&[("old", 1), ("shared", 2)])) })
            .await;
        assert_eq!(cache.keys().await, vec!["old", "shared"]);

        let found: Result<_, ()> = cache
            .get_or_refresh("new", || async { Ok(pairs(&[("new", 3), ("shared", 4)])) })
            .await;
        assert_eq!(found.unwrap(), Some(3));
        assert_eq!(cache.keys().await, vec!["new", "shared"]);
        assert_eq!(cache.get("shared").await, Some(4));
        assert_eq!(cache.get("old").await, None);
    }

    #[tokio::test]
    async fn miss_after_refresh_is_none() {
        let cache: ResultCache<u32> = ResultCache::new();
        let found: Result<_, ()> = cache
            .get_or_refresh("missing", || async { Ok(pairs(&[("a", 1)])) })
            .await;
        assert_eq!(found.unwrap(), None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_entries() {
        let cache = ResultCache::new();
        let _: Result<_, ()> = cache
            .get_or_refresh("a", || async { Ok(pairs(&[("a", 1)])) })
            .await;

        let failed: Result<Option<u32>, &str> = cache
            .get_or_refresh("b", || async { Err("bridge unreachable") })
            .await;
        assert_eq!(failed, Err("bridge unreachable"));
        assert_eq!(cache.get("a").await, Some(1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_misses_refresh_once() {
        let cache = Arc::new(ResultCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    let found: Result<_, ()> = cache
                        .get_or_refresh("a", || async {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                            Ok(pairs(&[("a", 7)]))
                        })
                        .await;
                    found.unwrap()
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), Some(7));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!cache.is_empty().await);
    }
}
