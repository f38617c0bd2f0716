//! Session-scoped cache of resolved preview URLs.
//!
//! Owned by whoever drives a screen/session; not a module global. Entries
//! expire after a fixed TTL and are evicted lazily on lookup. The store is
//! unbounded — acceptable for session lifetimes and item counts this small,
//! and a known scaling limitation.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a resolved preview URL stays valid.
pub const DEFAULT_PREVIEW_TTL: Duration = Duration::from_secs(3 * 24 * 60 * 60);

/// Time source, injectable so expiry is testable.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct CacheEntry {
    url: String,
    stored_at: Instant,
}

/// URL → resolved preview URL store with time-based expiry.
///
/// Single-threaded access assumed; concurrent resolution for the same key is
/// not de-duplicated (last write wins).
#[derive(Debug)]
pub struct PreviewCache<C: Clock = SystemClock> {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    clock: C,
}

impl PreviewCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_PREVIEW_TTL, SystemClock)
    }
}

impl Default for PreviewCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PreviewCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Look up a cached URL. Expired entries count as absent and are removed.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now();
        match self.entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) <= self.ttl => {
                Some(entry.url.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a resolved URL, unconditionally overwriting any existing entry.
    pub fn put(&mut self, key: impl Into<String>, url: impl Into<String>) {
        let stored_at = self.clock.now();
        self.entries.insert(
            key.into(),
            CacheEntry {
                url: url.into(),
                stored_at,
            },
        );
    }

    /// Remove one entry, or all entries when `key` is `None`.
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
            }
            None => self.entries.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock whose time only moves when a test advances it.
    #[derive(Clone)]
    struct ManualClock {
        now: Rc<Cell<Instant>>,
    }

    impl ManualClock {
        fn start() -> Self {
            Self {
                now: Rc::new(Cell::new(Instant::now())),
            }
        }

        fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }

    #[test]
    fn test_round_trip() {
        let mut cache = PreviewCache::new();
        cache.put("https://a", "https://img/a");
        assert_eq!(cache.get("https://a").as_deref(), Some("https://img/a"));
        assert_eq!(cache.get("https://b"), None);
    }

    #[test]
    fn test_expired_entry_is_absent_and_evicted() {
        let clock = ManualClock::start();
        let mut cache = PreviewCache::with_clock(Duration::from_secs(60), clock.clone());
        cache.put("k", "v");

        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get("k").as_deref(), Some("v"));

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_refreshes_timestamp() {
        let clock = ManualClock::start();
        let mut cache = PreviewCache::with_clock(Duration::from_secs(60), clock.clone());
        cache.put("k", "old");

        clock.advance(Duration::from_secs(45));
        cache.put("k", "new");

        clock.advance(Duration::from_secs(30));
        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn test_clear_one_and_all() {
        let mut cache = PreviewCache::new();
        cache.put("a", "1");
        cache.put("b", "2");

        cache.clear(Some("a"));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b").as_deref(), Some("2"));

        cache.clear(None);
        assert!(cache.is_empty());
    }
}
