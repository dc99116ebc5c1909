use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::generator::SampleDataGenerator;
use crate::models::Dataset;

type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// Datasets memoized per seed. Entries live until explicitly invalidated;
/// there is no upstream source that could make them stale.
pub struct DatasetCache {
    clock: Clock,
    entries: HashMap<u64, Dataset>,
}

impl DatasetCache {
    pub fn new(clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            entries: HashMap::new(),
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(|| Utc::now().naive_utc())
    }

    pub fn get_or_generate(&mut self, seed: u64) -> &Dataset {
        match self.entries.entry(seed) {
            Entry::Occupied(slot) => {
                debug!(seed, "dataset cache hit");
                slot.into_mut()
            }
            Entry::Vacant(slot) => {
                let anchor = (self.clock)();
                let dataset = SampleDataGenerator::new(seed, anchor).generate();
                info!(seed, anchor = %anchor, "generated dataset");
                slot.insert(dataset)
            }
        }
    }

    /// Drops the dataset for `seed` so the next lookup regenerates it.
    pub fn invalidate(&mut self, seed: u64) -> bool {
        let removed = self.entries.remove(&seed).is_some();
        if removed {
            info!(seed, "dataset invalidated");
        }
        removed
    }

    pub fn clear(&mut self) {
        info!(entries = self.entries.len(), "dataset cache cleared");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
