//! Bounded, expiring memo of spirit analyses.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::domain::entities::SpiritProfile;

/// Default maximum number of memoized analyses.
pub const DEFAULT_CAPACITY: usize = 256;

/// LRU cache of analyses keyed by a digest of the normalized text.
pub struct AnalysisCache {
    entries: Mutex<LruCache<String, (Instant, SpiritProfile)>>,
    ttl: Duration,
}

impl AnalysisCache {
    /// Creates a cache holding at most `capacity` entries for `ttl` each.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
            ttl,
        }
    }

    /// Digest of the trimmed, lower-cased text.
    #[must_use]
    pub fn key_for(text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.trim().to_lowercase().as_bytes());
        hex::encode(&hasher.finalize()[..16])
    }

    /// Returns the memoized profile for `text` unless it expired.
    pub fn get(&self, text: &str) -> Option<SpiritProfile> {
        let key = Self::key_for(text);
        let mut entries = self.entries.lock();

        let expired = match entries.get(&key) {
            Some((stored_at, profile)) if stored_at.elapsed() < self.ttl => {
                trace!(key = %key, "Analysis cache hit");
                return Some(profile.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(&key);
        }
        None
    }

    /// Memoizes `profile` for `text`.
    pub fn put(&self, text: &str, profile: SpiritProfile) {
        self.entries
            .lock()
            .put(Self::key_for(text), (Instant::now(), profile));
    }

    /// Number of memoized entries, expired ones included until touched.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, Duration::from_secs(600))
    }
}
