// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::domain::models::destination::Destination;
use crate::domain::search::source::SourceName;

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub expirations: u64,
}

#[derive(Clone)]
struct CacheEntry {
    results: Vec<Destination>,
    created_at: Instant,
}

/// In-memory cache of per-(query, source) result sets.
///
/// One instance is constructed at startup and handed to the aggregator;
/// lifetime is decided by the caller at lookup time, so the same entry can
/// be live for one call and stale for another. Entries are only dropped on
/// expired lookups or `clear` — growth across distinct query/source pairs
/// is unbounded.
pub struct SearchCache {
    entries: DashMap<String, CacheEntry>,
    stats: Mutex<CacheStats>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    fn key(query: &str, source: SourceName) -> String {
        format!("{}-{}", query, source)
    }

    /// Look up live results for `(query, source)`. An entry older than
    /// `lifetime` is removed and reported as a miss.
    pub fn get(
        &self,
        query: &str,
        source: SourceName,
        lifetime: Duration,
    ) -> Option<Vec<Destination>> {
        let key = Self::key(query, source);

        let Some(entry) = self.entries.get(&key) else {
            self.stats.lock().misses += 1;
            return None;
        };

        if entry.created_at.elapsed() > lifetime {
            drop(entry);
            self.entries.remove(&key);
            let mut stats = self.stats.lock();
            stats.misses += 1;
            stats.expirations += 1;
            debug!("Cache entry expired for key: {}", key);
            return None;
        }

        self.stats.lock().hits += 1;
        Some(entry.results.clone())
    }

    /// Store results for `(query, source)`, overwriting any previous entry.
    pub fn set(&self, query: &str, source: SourceName, results: Vec<Destination>) {
        let key = Self::key(query, source);
        let results_count = results.len();

        self.entries.insert(
            key.clone(),
            CacheEntry {
                results,
                created_at: Instant::now(),
            },
        );
        self.stats.lock().stores += 1;

        debug!("Stored {} results in cache for key: {}", results_count, key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
        debug!("Cleared all cache entries");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new()
    }
}
