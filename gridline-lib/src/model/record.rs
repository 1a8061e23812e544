//! Person records and their identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a record, unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<Uuid> for RowId {
    fn from(id: Uuid) -> Self {
        Self(id.hyphenated().to_string())
    }
}

/// Relationship status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Relationship,
    Complicated,
    Single,
}

impl Status {
    /// Every status, in declaration order.
    pub const ALL: [Status; 3] = [Status::Relationship, Status::Complicated, Status::Single];

    /// The lowercase name used in serialized data and cells.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relationship => "relationship",
            Self::Complicated => "complicated",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of table data, possibly with nested sub-rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RowId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub visits: u32,
    pub progress: u32,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_rows: Vec<Record>,
}

impl Record {
    /// Whether this record has sub-rows.
    pub fn has_children(&self) -> bool {
        !self.sub_rows.is_empty()
    }

    /// Iterates every descendant depth-first, not including `self`.
    pub fn descendants(&self) -> Walk<'_> {
        walk(&self.sub_rows)
    }

    /// Number of descendants at all depths.
    pub fn descendant_count(&self) -> usize {
        self.descendants().count()
    }

    /// Finds a record by id in this subtree, including `self`.
    pub fn find(&self, id: &RowId) -> Option<&Record> {
        if &self.id == id {
            return Some(self);
        }
        self.descendants().find(|record| &record.id == id)
    }
}

/// Depth-first pre-order iterator over a record forest.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, Record>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.stack.last_mut()?.next();
            match next {
                Some(record) => {
                    self.stack.push(record.sub_rows.iter());
                    return Some(record);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Walks every record in `records` and their descendants, parents first.
pub fn walk(records: &[Record]) -> Walk<'_> {
    Walk {
        stack: vec![records.iter()],
    }
}
