//! Simulation name → road-status sampling interval.
//!
//! The interval never changes for a given dataset, so any unexpired entry
//! is correct.  The TTL only bounds how long names of retired simulations
//! stay resident.  On a miss the caller looks the interval up and calls
//! [`IntervalCache::put`]; the cache never performs the lookup itself.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Clone, Copy, Debug)]
struct Entry {
    interval: i64,
    expires:  Instant,
}

/// Thread-safe TTL cache.  One instance per process, shared by reference.
#[derive(Debug)]
pub struct IntervalCache {
    ttl:     Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl Default for IntervalCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl IntervalCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// The cached interval for `name`, or `None` if absent or expired.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.get_at(name, Instant::now())
    }

    /// Cache `interval` for `name`, replacing any previous entry.
    pub fn put(&self, name: &str, interval: i64) {
        self.put_at(name, interval, Instant::now());
    }

    /// Number of resident entries, expired ones included until the next sweep.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn get_at(&self, name: &str, now: Instant) -> Option<i64> {
        let mut entries = self.lock();
        match entries.get(name) {
            Some(e) if now < e.expires => {
                debug!("interval cache hit for {name:?}");
                Some(e.interval)
            }
            Some(_) => {
                entries.remove(name);
                debug!("interval cache entry for {name:?} expired");
                None
            }
            None => {
                debug!("interval cache miss for {name:?}");
                None
            }
        }
    }

    pub(crate) fn put_at(&self, name: &str, interval: i64, now: Instant) {
        let mut entries = self.lock();
        entries.retain(|_, e| now < e.expires);
        entries.insert(name.to_owned(), Entry { interval, expires: now + self.ttl });
    }

    // Entries are independent; a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
