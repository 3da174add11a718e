//! In-memory summary cache with TTL and FIFO eviction.
//! Capacity: 50, TTL: 24 hours. Lookups never reorder entries.

use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};

use tokio::time::Instant;
use tracing::debug;

use crate::types::CacheKey;

pub const DEFAULT_CAPACITY: usize = 50;
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Storage seam for the dispatcher; swap in a persistent store without touching it.
pub trait SummaryStore: Send {
    fn get(&mut self, key: &CacheKey) -> Option<String>;
    fn put(&mut self, key: CacheKey, summary: String);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct CacheEntry {
    summary: String,
    created_at: Instant,
}

pub struct SummaryCache {
    entries: HashMap<CacheKey, CacheEntry>,
    order: VecDeque<CacheKey>,
    capacity: usize,
    ttl: Duration,
}

impl SummaryCache {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = capacity.max(1);

        Self {
            entries: HashMap::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
            capacity,
            ttl,
        }
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn remove(&mut self, key: &CacheKey) {
        self.entries.remove(key);
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl SummaryStore for SummaryCache {
    /// Returns the summary if present and younger than the TTL. Expired entries are dropped.
    fn get(&mut self, key: &CacheKey) -> Option<String> {
        let entry = self.entries.get(key)?;
        if entry.created_at.elapsed() < self.ttl {
            return Some(entry.summary.clone());
        }

        debug!(key = %key, "cache entry expired");
        self.remove(key);
        None
    }

    /// Overwriting an existing key refreshes its timestamp but keeps its FIFO position.
    fn put(&mut self, key: CacheKey, summary: String) {
        let entry = CacheEntry {
            summary,
            created_at: Instant::now(),
        };

        if self.entries.insert(key.clone(), entry).is_none() {
            self.order.push_back(key);
        }

        if self.entries.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                debug!(key = %oldest, "evicting oldest cache entry");
                self.entries.remove(&oldest);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
