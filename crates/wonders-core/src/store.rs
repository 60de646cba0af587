//! In-memory store for wonder records
//!
//! A single coarse `RwLock` guards both the record map and the id counter, so
//! concurrent inserts can never race an id assignment and readers never
//! observe a half-applied mutation. Operations are short in-memory map
//! accesses; the lock is never held across I/O.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rand::seq::IteratorRandom;

use crate::error::StoreError;
use crate::wonder::{Wonder, WonderDraft};

/// The in-memory keyed collection of live wonder records.
///
/// Ids are assigned monotonically and never reused within a process lifetime,
/// so `list()` (ascending id) is also insertion order. Construct one store at
/// process start and share it behind an `Arc`; there is no ambient singleton.
pub struct WonderStore {
    inner: RwLock<Inner>,
}

struct Inner {
    records: BTreeMap<i64, Wonder>,
    next_id: i64,
}

impl WonderStore {
    /// Create an empty store. The first assigned id is 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store a new record, assigning the next free id. Any id carried by the
    /// draft is ignored.
    pub fn insert(&self, draft: WonderDraft) -> i64 {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.insert(id, Wonder::from_draft(id, draft));
        id
    }

    /// Re-insert a record that already carries a positive id (seed records
    /// with explicit ids). Advances the id counter past it so later inserts
    /// never collide with pre-seeded ids.
    pub fn restore(&self, wonder: Wonder) {
        let mut inner = self.inner.write();
        inner.next_id = inner.next_id.max(wonder.id + 1);
        inner.records.insert(wonder.id, wonder);
    }

    /// Exact lookup by id.
    pub fn get(&self, id: i64) -> Option<Wonder> {
        self.inner.read().records.get(&id).cloned()
    }

    /// All live records in insertion order.
    pub fn list(&self) -> Vec<Wonder> {
        self.inner.read().records.values().cloned().collect()
    }

    /// Overwrite every mutable field of the record at `id`, keeping the id.
    pub fn update(&self, id: i64, draft: WonderDraft) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        match inner.records.get_mut(&id) {
            Some(existing) => {
                existing.apply(draft);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Remove the record at `id`. The id is not reassigned afterwards.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        match inner.records.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Number of live records.
    pub fn count(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store holds no records (the seeding decision).
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Uniformly select one record from the current live set.
    pub fn pick_random(&self) -> Result<Wonder, StoreError> {
        let inner = self.inner.read();
        inner
            .records
            .values()
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(StoreError::Empty)
    }
}

impl Default for WonderStore {
    fn default() -> Self {
        Self::new()
    }
}
