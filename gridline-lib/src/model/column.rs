//! Column definitions.
//!
//! A column is either a group (it has child columns) or a leaf (it has an
//! accessor that reads a cell value out of a record). `ColumnSet` flattens
//! the definition tree so the rest of the table can address columns by
//! index and walk parent links.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use super::record::Record;
use crate::error::TableError;

/// Default column width in terminal cells.
pub const DEFAULT_SIZE: u16 = 14;
/// Default lower bound for a column width.
pub const DEFAULT_MIN_SIZE: u16 = 4;
/// Default upper bound for a column width.
pub const DEFAULT_MAX_SIZE: u16 = 60;

/// Identifier of a column, unique within a `ColumnSet`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A record field addressable by a leaf column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Age,
    Visits,
    Progress,
    Status,
}

impl Field {
    /// The serialized field name, also used as the column id.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Age => "age",
            Self::Visits => "visits",
            Self::Progress => "progress",
            Self::Status => "status",
        }
    }

    /// Reads this field out of a record.
    pub fn read(&self, record: &Record) -> CellValue {
        match self {
            Self::FirstName => CellValue::Text(record.first_name.clone()),
            Self::LastName => CellValue::Text(record.last_name.clone()),
            Self::Age => CellValue::Number(record.age.into()),
            Self::Visits => CellValue::Number(record.visits.into()),
            Self::Progress => CellValue::Number(record.progress.into()),
            Self::Status => CellValue::Text(record.status.as_str().to_string()),
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Number(u64),
    Text(String),
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// How a leaf column obtains its cell value.
#[derive(Debug, Clone, Copy)]
pub enum Accessor {
    /// Read a record field directly.
    Field(Field),
    /// Compute a value from the whole record.
    Derived(fn(&Record) -> CellValue),
}

impl Accessor {
    pub fn value(&self, record: &Record) -> CellValue {
        match self {
            Self::Field(field) => field.read(record),
            Self::Derived(f) => f(record),
        }
    }
}

/// What a header or footer cell displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// Fixed text.
    Text(String),
    /// The id of the column the cell belongs to.
    ColumnId,
}

impl Header {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Resolves the display string for a column.
    pub fn resolve(&self, id: &ColumnId) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::ColumnId => id.to_string(),
        }
    }
}

/// A column definition, possibly with child columns.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub header: Header,
    pub footer: Option<Header>,
    pub accessor: Option<Accessor>,
    pub columns: Vec<ColumnDef>,
    pub size: u16,
    pub min_size: u16,
    pub max_size: u16,
    pub sortable: bool,
}

impl ColumnDef {
    fn base(id: ColumnId) -> Self {
        Self {
            id,
            header: Header::ColumnId,
            footer: None,
            accessor: None,
            columns: Vec::new(),
            size: DEFAULT_SIZE,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            sortable: false,
        }
    }

    /// A leaf column reading `field`, with the field key as its id.
    pub fn field(field: Field) -> Self {
        Self {
            accessor: Some(Accessor::Field(field)),
            sortable: true,
            ..Self::base(ColumnId::new(field.key()))
        }
    }

    /// A leaf column computing its value with `f`.
    pub fn derived(id: impl Into<String>, f: fn(&Record) -> CellValue) -> Self {
        Self {
            accessor: Some(Accessor::Derived(f)),
            sortable: true,
            ..Self::base(ColumnId::new(id))
        }
    }

    /// A group column. The header text doubles as the id.
    pub fn group(header: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        let header = header.into();
        Self {
            header: Header::Text(header.clone()),
            columns,
            ..Self::base(ColumnId::new(header))
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Header::Text(header.into());
        self
    }

    pub fn footer(mut self, footer: Header) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn min_size(mut self, min_size: u16) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn max_size(mut self, max_size: u16) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A column in a flattened `ColumnSet`.
#[derive(Debug, Clone)]
pub struct Column {
    pub id: ColumnId,
    pub header: Header,
    pub footer: Option<Header>,
    pub accessor: Option<Accessor>,
    pub size: u16,
    pub min_size: u16,
    pub max_size: u16,
    pub sortable: bool,
    /// Depth in the definition tree, 0 for top-level columns.
    pub depth: usize,
    /// Index of the parent column.
    pub parent: Option<usize>,
    /// Indices of the child columns, in order.
    pub children: Vec<usize>,
}

impl Column {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Clamps a width to this column's bounds.
    pub fn clamp_size(&self, size: u16) -> u16 {
        size.clamp(self.min_size, self.max_size.max(self.min_size))
    }
}

/// Flattened column tree, in definition pre-order.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    columns: Vec<Column>,
    leaves: Vec<usize>,
    by_id: HashMap<ColumnId, usize>,
}

impl ColumnSet {
    /// Flattens `defs`, rejecting duplicate ids.
    pub fn new(defs: Vec<ColumnDef>) -> Result<Self, TableError> {
        let mut set = Self {
            columns: Vec::new(),
            leaves: Vec::new(),
            by_id: HashMap::new(),
        };
        for def in defs {
            set.push(def, 0, None)?;
        }
        Ok(set)
    }

    fn push(&mut self, def: ColumnDef, depth: usize, parent: Option<usize>) -> Result<usize, TableError> {
        let index = self.columns.len();
        if self.by_id.insert(def.id.clone(), index).is_some() {
            return Err(TableError::DuplicateColumnId(def.id));
        }
        let is_leaf = def.is_leaf();
        self.columns.push(Column {
            id: def.id,
            header: def.header,
            footer: def.footer,
            accessor: def.accessor,
            size: def.size,
            min_size: def.min_size,
            max_size: def.max_size,
            sortable: def.sortable && is_leaf,
            depth,
            parent,
            children: Vec::new(),
        });
        if is_leaf {
            self.leaves.push(index);
        }
        for child in def.columns {
            let child_index = self.push(child, depth + 1, Some(index))?;
            self.columns[index].children.push(child_index);
        }
        Ok(index)
    }

    /// All columns, groups included.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn get(&self, id: &ColumnId) -> Option<&Column> {
        self.index_of(id).and_then(|i| self.columns.get(i))
    }

    pub fn index_of(&self, id: &ColumnId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Indices of leaf columns, left to right.
    pub fn leaves(&self) -> &[usize] {
        &self.leaves
    }

    /// Indices of the leaf columns under `index` (itself if it is a leaf).
    pub fn leaves_of(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(index, &mut out);
        out
    }

    fn collect_leaves(&self, index: usize, out: &mut Vec<usize>) {
        let Some(column) = self.columns.get(index) else {
            return;
        };
        if column.is_leaf() {
            out.push(index);
        }
        for &child in &column.children {
            self.collect_leaves(child, out);
        }
    }

    /// Position of a leaf column among the leaves.
    pub fn leaf_position(&self, index: usize) -> Option<usize> {
        self.leaves.iter().position(|&leaf| leaf == index)
    }

    /// Deepest leaf depth, or `None` for an empty set.
    pub fn max_depth(&self) -> Option<usize> {
        self.leaves.iter().map(|&i| self.columns[i].depth).max()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// The column layout of the demo table.
pub fn default_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::group(
            "Name",
            vec![
                ColumnDef::field(Field::FirstName)
                    .size(16)
                    .footer(Header::ColumnId),
                ColumnDef::derived("lastName", |record| {
                    CellValue::Text(record.last_name.clone())
                })
                .header("Last Name")
                .footer(Header::ColumnId),
            ],
        )
        .footer(Header::ColumnId),
        ColumnDef::group(
            "Info",
            vec![
                ColumnDef::field(Field::Age)
                    .header("Age")
                    .size(8)
                    .footer(Header::ColumnId),
                ColumnDef::group(
                    "More Info",
                    vec![
                        ColumnDef::field(Field::Visits)
                            .header("Visits")
                            .size(10)
                            .footer(Header::ColumnId),
                        ColumnDef::field(Field::Status)
                            .header("Status")
                            .footer(Header::ColumnId),
                        ColumnDef::field(Field::Progress)
                            .header("Profile Progress")
                            .size(18)
                            .footer(Header::ColumnId),
                    ],
                ),
            ],
        )
        .footer(Header::ColumnId),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns_flatten() {
        let set = ColumnSet::new(default_columns()).unwrap();
        let leaf_ids: Vec<&str> = set
            .leaves()
            .iter()
            .map(|&i| set.columns()[i].id.as_str())
            .collect();
        assert_eq!(
            leaf_ids,
            vec!["firstName", "lastName", "age", "visits", "status", "progress"]
        );
        assert_eq!(set.max_depth(), Some(2));

        let more_info = set.index_of(&"More Info".into()).unwrap();
        assert_eq!(set.columns()[more_info].depth, 1);
        assert_eq!(set.leaves_of(more_info).len(), 3);

        let info = set.index_of(&"Info".into()).unwrap();
        assert_eq!(set.leaves_of(info).len(), 4);
    }

    #[test]
    fn test_duplicate_column_id_rejected() {
        let defs = vec![ColumnDef::field(Field::Age), ColumnDef::field(Field::Age)];
        assert!(matches!(
            ColumnSet::new(defs),
            Err(TableError::DuplicateColumnId(id)) if id.as_str() == "age"
        ));
    }

    #[test]
    fn test_groups_are_never_sortable() {
        let set = ColumnSet::new(default_columns()).unwrap();
        let name = set.get(&"Name".into()).unwrap();
        assert!(!name.sortable);
        assert!(set.get(&"age".into()).unwrap().sortable);
    }

    #[test]
    fn test_cell_value_ordering() {
        assert!(CellValue::Number(9) < CellValue::Number(10));
        assert!(CellValue::Text("b".into()) > CellValue::Text("a".into()));
        assert!(CellValue::Number(1000) < CellValue::Text("0".into()));
    }

    #[test]
    fn test_header_resolve() {
        let id = ColumnId::from("visits");
        assert_eq!(Header::ColumnId.resolve(&id), "visits");
        assert_eq!(Header::text("Visits").resolve(&id), "Visits");
    }
}
