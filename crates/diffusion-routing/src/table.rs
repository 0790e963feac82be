//! Per-node event table
//!
//! The [`EventTable`] maps each event id to the best route record a node has
//! seen for it. Records only ever improve: a candidate replaces the stored
//! record only when its hop distance is strictly smaller, so on ties the
//! first record wins.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use diffusion_core::{EventId, EventRecord};

/// What an [`EventTable::upsert`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record existed for the event
    Inserted,
    /// The candidate replaced a worse record
    Improved { previous: EventRecord },
    /// The stored record was as good or better
    Unchanged,
}

impl UpsertOutcome {
    /// Whether the table changed
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Event routing table owned by a single node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTable {
    records: BTreeMap<EventId, EventRecord>,
}

impl EventTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, or replace the stored one if the candidate is
    /// strictly closer to the event
    pub fn upsert(&mut self, record: EventRecord) -> UpsertOutcome {
        match self.records.entry(record.event_id) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                UpsertOutcome::Inserted
            }
            Entry::Occupied(mut slot) => {
                if record.is_better_than(slot.get()) {
                    let previous = slot.insert(record);
                    UpsertOutcome::Improved { previous }
                } else {
                    UpsertOutcome::Unchanged
                }
            }
        }
    }

    /// Check if the table knows the event
    pub fn contains(&self, event_id: EventId) -> bool {
        self.records.contains_key(&event_id)
    }

    /// Get the stored record for an event
    pub fn get(&self, event_id: EventId) -> Option<&EventRecord> {
        self.records.get(&event_id)
    }

    /// Copy of all records, ordered by event id
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.records.values().copied().collect()
    }

    /// Iterate over records in event id order
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.values()
    }

    /// Get the number of known events
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget every record
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
