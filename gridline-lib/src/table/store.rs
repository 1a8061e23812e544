//! Row store: the ordered collection of top-level records.

use std::collections::HashSet;

use log::debug;

use crate::error::TableError;
use crate::model::{walk, Record, RowId};

/// Owns the record tree and its top-level order.
///
/// Every mutation bumps `revision`, which is how views learn the sequence
/// changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStore {
    records: Vec<Record>,
    revision: u64,
}

impl RowStore {
    /// Creates a store, rejecting duplicate ids at any depth.
    pub fn new(records: Vec<Record>) -> Result<Self, TableError> {
        check_unique_ids(&records)?;
        Ok(Self {
            records,
            revision: 0,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of top-level records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces all records.
    pub fn replace(&mut self, records: Vec<Record>) -> Result<(), TableError> {
        check_unique_ids(&records)?;
        self.records = records;
        self.revision += 1;
        Ok(())
    }

    /// Moves the top-level record at `source` to index `target`.
    ///
    /// The record is removed first and then inserted at `target` of the
    /// shortened sequence, so when `source < target` it lands one slot
    /// past the row that was at `target`: `[A, B, C, D]` with
    /// `reorder(0, 2)` gives `[B, C, A, D]`. Both indices must be in
    /// `0..len`; otherwise nothing changes.
    pub fn reorder(&mut self, source: usize, target: usize) -> Result<(), TableError> {
        let len = self.records.len();
        for index in [source, target] {
            if index >= len {
                return Err(TableError::RowIndexOutOfRange { index, len });
            }
        }
        if source != target {
            let record = self.records.remove(source);
            self.records.insert(target, record);
        }
        self.revision += 1;
        debug!("Reordered row {} -> {} (revision {})", source, target, self.revision);
        Ok(())
    }

    /// Moves the record at `source` so it sits before the row currently at
    /// `slot`, or at the end when `slot == len`. Returns the final index.
    pub fn move_to_slot(&mut self, source: usize, slot: usize) -> Result<usize, TableError> {
        let len = self.records.len();
        if source >= len {
            return Err(TableError::RowIndexOutOfRange { index: source, len });
        }
        if slot > len {
            return Err(TableError::RowIndexOutOfRange { index: slot, len });
        }
        let target = if source < slot { slot - 1 } else { slot };
        self.reorder(source, target)?;
        Ok(target)
    }

    /// Finds a record by id at any depth.
    pub fn find(&self, id: &RowId) -> Option<&Record> {
        walk(&self.records).find(|record| &record.id == id)
    }

    /// Index of the top-level record that is, or contains, `id`.
    pub fn top_level_index(&self, id: &RowId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.find(id).is_some())
    }

    /// Follows child indices from the top level.
    pub fn get_path(&self, path: &[usize]) -> Option<&Record> {
        let (&first, rest) = path.split_first()?;
        let mut record = self.records.get(first)?;
        for &index in rest {
            record = record.sub_rows.get(index)?;
        }
        Some(record)
    }
}

fn check_unique_ids(records: &[Record]) -> Result<(), TableError> {
    let mut seen = HashSet::new();
    for record in walk(records) {
        if !seen.insert(&record.id) {
            return Err(TableError::DuplicateRowId(record.id.clone()));
        }
    }
    Ok(())
}
