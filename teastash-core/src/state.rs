//! Local collection state.
//!
//! [`TeaList`] is the single source of truth for rendering: an ordered,
//! in-memory sequence of [`TeaRecord`]s, mutable only through the methods
//! here. It never talks to the remote store.
//!
//! Every successful mutation bumps a revision counter. The rendering layer
//! watches the counter to know the view is stale; that is the only side
//! effect mutations have.

use crate::error::{Error, Result};
use crate::types::TeaRecord;

/// Ordered in-memory collection of teas.
#[derive(Debug, Default)]
pub struct TeaList {
    records: Vec<TeaRecord>,
    revision: u64,
}

impl TeaList {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current records, in display order.
    pub fn get(&self) -> &[TeaRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Monotonic counter, bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Substitute the entire sequence (after a successful full refresh).
    pub fn replace(&mut self, records: Vec<TeaRecord>) {
        self.records = records;
        self.bump();
    }

    /// Add one record at the end.
    pub fn append(&mut self, record: TeaRecord) {
        self.records.push(record);
        self.bump();
    }

    /// Delete and return the record at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<TeaRecord> {
        if index >= self.records.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        self.bump();
        Ok(removed)
    }

    /// Replace the record at `index` in place, preserving its position.
    pub fn update_at(&mut self, index: usize, record: TeaRecord) -> Result<()> {
        if index >= self.records.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.records[index] = record;
        self.bump();
        Ok(())
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
