//! Per-stage memo of coordinate classifications.

use hashbrown::HashMap;

use crate::models::Classification;
use crate::pip::ClassifierService;

/// Cache of classifications keyed by the exact coordinate bits.
///
/// Owned by one tagging stage; observation files repeat station
/// coordinates often enough that most rows hit.
///
/// Entries are never evicted, so the cache grows with the number of distinct
/// coordinates. Create one per batch, or call [`LookupCache::clear`] between
/// batches.
#[derive(Debug, Default)]
pub struct LookupCache {
    entries: HashMap<(u64, u64), Classification>,
    hits: u64,
    misses: u64,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached classification, computing it on a miss.
    pub fn lookup(&mut self, service: &ClassifierService, lon: f64, lat: f64) -> &Classification {
        let key = (lon.to_bits(), lat.to_bits());
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.entries
            .entry(key)
            .or_insert_with(|| service.classify(lon, lat))
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
