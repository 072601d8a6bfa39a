//! In-memory texture cache with single-flight loading.
//!
//! Every key has at most one load in flight. Callers that ask for a key while
//! its load is pending attach to the same shared future and observe the same
//! outcome. Bookkeeping is updated under a synchronous lock before the first
//! suspension point, so two near-simultaneous callers can never both start a
//! fetch. When every caller waiting on a load goes away before it finishes,
//! the load is dropped and forgotten.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared, join_all};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::domain::entities::{Texture, TextureKey};
use crate::domain::errors::{TextureError, TextureResult};
use crate::domain::ports::TextureSourcePort;

type PendingLoad = Shared<BoxFuture<'static, TextureResult<Texture>>>;

/// Shared, explicitly owned cache of decoded textures.
pub struct TextureCache {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn TextureSourcePort>,
    state: Mutex<CacheState>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<TextureKey, Texture>,
    pending: HashMap<TextureKey, PendingLoad>,
    /// Bumped by `clear`; loads from older generations do not commit.
    generation: u64,
}

impl std::fmt::Debug for TextureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureCache")
            .field("size", &self.size())
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

impl TextureCache {
    /// Creates an empty cache backed by `source`.
    #[must_use]
    pub fn new(source: Arc<dyn TextureSourcePort>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(CacheState::default()),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the texture for `key`, loading it if necessary.
    ///
    /// Cached textures are returned without suspending. If a load for `key`
    /// is already pending, this awaits that load instead of starting another.
    ///
    /// # Errors
    /// Returns the load failure. Every caller waiting on the same pending load
    /// receives the same error, and the key stays uncached so a later call
    /// retries.
    ///
    /// Dropping the last caller waiting on a pending load cancels that load.
    pub async fn load(&self, key: impl Into<TextureKey>) -> TextureResult<Texture> {
        let key = key.into();
        let pending = {
            let mut state = self.inner.state.lock();

            if let Some(texture) = state.entries.get(&key) {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                trace!(key = %key, "Texture cache hit");
                return Ok(Arc::clone(texture));
            }
            self.inner.misses.fetch_add(1, Ordering::Relaxed);

            if let Some(pending) = state.pending.get(&key) {
                trace!(key = %key, "Joining pending texture load");
                pending.clone()
            } else {
                let load = Self::run_load(Arc::clone(&self.inner), key.clone(), state.generation)
                    .boxed()
                    .shared();
                state.pending.insert(key.clone(), load.clone());
                load
            }
        };

        let mut waiter = Waiter {
            inner: &self.inner,
            key,
            load: pending,
            done: false,
        };
        let result = (&mut waiter.load).await;
        waiter.done = true;
        result
    }

    async fn run_load(
        inner: Arc<Inner>,
        key: TextureKey,
        generation: u64,
    ) -> TextureResult<Texture> {
        debug!(key = %key, "Loading texture");
        let result = inner.source.fetch(&key).await.map(Arc::new);

        let committed = {
            let mut state = inner.state.lock();
            if state.generation == generation {
                state.pending.remove(&key);
                if let Ok(texture) = &result {
                    state.entries.insert(key.clone(), Arc::clone(texture));
                }
                true
            } else {
                false
            }
        };

        match &result {
            Ok(_) if committed => debug!(key = %key, "Texture loaded"),
            Ok(_) => debug!(key = %key, "Texture loaded after clear, not cached"),
            Err(e) => warn!(key = %key, error = %e, "Texture load failed"),
        }
        result
    }

    /// Loads every key concurrently and waits for all of them.
    ///
    /// Successful loads stay cached even when others fail.
    ///
    /// # Errors
    /// Returns [`TextureError::PreloadFailed`] naming every key that failed.
    pub async fn preload<I, K>(&self, keys: I) -> TextureResult<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<TextureKey>,
    {
        let keys: Vec<TextureKey> = keys.into_iter().map(Into::into).collect();
        let total = keys.len();
        let results = join_all(keys.iter().map(|key| self.load(key))).await;

        let failed: Vec<TextureKey> = keys
            .into_iter()
            .zip(results)
            .filter_map(|(key, result)| result.err().map(|_| key))
            .collect();

        if failed.is_empty() {
            debug!(count = total, "Preloaded textures");
            Ok(())
        } else {
            warn!(failed = failed.len(), total, "Texture preload incomplete");
            Err(TextureError::PreloadFailed { failed, total })
        }
    }

    /// Returns the cached texture for `key` without loading it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Texture> {
        let state = self.inner.state.lock();
        state.entries.get(key).cloned()
    }

    /// Returns true if a load for `key` is in flight.
    #[must_use]
    pub fn is_loading(&self, key: &str) -> bool {
        self.inner.state.lock().pending.contains_key(key)
    }

    /// Number of cached textures.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    /// Number of loads in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.state.lock().pending.len()
    }

    /// Drops every cached texture and forgets in-flight loads.
    ///
    /// Transfers already started keep running and still resolve for their
    /// waiters, but their results are not cached.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        let cleared = state.entries.len();
        let abandoned = state.pending.len();
        state.entries.clear();
        state.pending.clear();
        state.generation += 1;
        debug!(cleared, abandoned, "Cleared texture cache");
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.inner.hits.load(Ordering::Relaxed);
        let misses = self.inner.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        let state = self.inner.state.lock();
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: state.entries.len(),
            pending: state.pending.len(),
        }
    }
}

/// A caller awaiting a pending load.
struct Waiter<'a> {
    inner: &'a Inner,
    key: TextureKey,
    load: PendingLoad,
    done: bool,
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        let mut state = self.inner.state.lock();
        let is_current = state
            .pending
            .get(&self.key)
            .is_some_and(|pending| pending.ptr_eq(&self.load));
        // The map and this waiter hold the only handles left.
        if is_current && self.load.strong_count() == Some(2) {
            state.pending.remove(&self.key);
            debug!(key = %self.key, "Abandoned texture load");
        }
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached textures.
    pub size: usize,
    /// Loads in flight.
    pub pending: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} textures ({} loading), {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.pending, self.hit_rate, self.hits, self.misses
        )
    }
}
