use chrono::NaiveDate;
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;

use crate::constants::DEFAULT_CACHE_CAPACITY;

/// Read-through cache of observed fixings keyed by (symbol, target date).
///
/// Entries never change once written, so concurrent writers racing on the
/// same key store the same value. Absent fixings are not cached. Inserting a
/// new key into a full cache flushes it first.
#[derive(Debug)]
pub struct FixingCache {
    entries: DashMap<(String, NaiveDate), Decimal>,
    capacity: usize,
}

impl Default for FixingCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl FixingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, symbol: &str, date: NaiveDate) -> Option<Decimal> {
        self.entries
            .get(&(symbol.to_string(), date))
            .map(|entry| *entry.value())
    }

    pub fn insert(&self, symbol: &str, date: NaiveDate, price: Decimal) {
        let key = (symbol.to_string(), date);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            debug!("Fixing cache full ({} entries), flushing", self.capacity);
            self.entries.clear();
        }
        self.entries.insert(key, price);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
