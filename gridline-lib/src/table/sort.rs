//! Single-column sort state.

use std::cmp::Ordering;
use std::fmt;

use crate::model::{Column, ColumnId, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Indicator drawn next to a sorted header.
    pub fn arrow(&self) -> char {
        match self {
            Self::Asc => '▲',
            Self::Desc => '▼',
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub column: ColumnId,
    pub direction: SortDirection,
}

/// Current sort, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<ColumnSort>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ColumnSort> {
        self.current.as_ref()
    }

    pub fn set(&mut self, sort: Option<ColumnSort>) {
        self.current = sort;
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Direction applied to `column`, if it is the sorted one.
    pub fn direction_for(&self, column: &ColumnId) -> Option<SortDirection> {
        self.current
            .as_ref()
            .filter(|sort| &sort.column == column)
            .map(|sort| sort.direction)
    }

    /// Cycles `column` through ascending, descending and unsorted.
    /// Switching to another column starts at ascending.
    pub fn toggle(&mut self, column: &ColumnId) -> Option<&ColumnSort> {
        self.current = match self.direction_for(column) {
            None => Some(ColumnSort {
                column: column.clone(),
                direction: SortDirection::Asc,
            }),
            Some(SortDirection::Asc) => Some(ColumnSort {
                column: column.clone(),
                direction: SortDirection::Desc,
            }),
            Some(SortDirection::Desc) => None,
        };
        self.current.as_ref()
    }
}

/// Indices of `records` in display order. Stable, so equal values keep
/// their store order.
pub(crate) fn sorted_indices(
    records: &[Record],
    sort: Option<(&Column, SortDirection)>,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    let Some((column, direction)) = sort else {
        return order;
    };
    let Some(accessor) = column.accessor else {
        return order;
    };
    let values: Vec<_> = records.iter().map(|record| accessor.value(record)).collect();
    order.sort_by(|&a, &b| direction.apply(values[a].cmp(&values[b])));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycles() {
        let mut state = SortState::new();
        let age = ColumnId::from("age");

        assert_eq!(
            state.toggle(&age).map(|s| s.direction),
            Some(SortDirection::Asc)
        );
        assert_eq!(
            state.toggle(&age).map(|s| s.direction),
            Some(SortDirection::Desc)
        );
        assert!(state.toggle(&age).is_none());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_switching_column_restarts_ascending() {
        let mut state = SortState::new();
        state.toggle(&ColumnId::from("age"));
        state.toggle(&ColumnId::from("age"));
        let sort = state.toggle(&ColumnId::from("visits")).cloned();
        assert_eq!(
            sort,
            Some(ColumnSort {
                column: ColumnId::from("visits"),
                direction: SortDirection::Asc
            })
        );
        assert_eq!(state.direction_for(&ColumnId::from("age")), None);
    }
}
