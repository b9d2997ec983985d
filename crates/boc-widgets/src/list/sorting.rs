//! Multi-key sorting orders.

use super::column::{Column, ColumnId};
use super::error::ListError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of one sorting entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header toggle cycle: none, ascending, descending, none.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    }
}

/// One `(column, direction)` pair.
#[derive(Clone, Debug)]
pub struct SortingOrderEntry {
    column: Column,
    direction: SortDirection,
}

impl SortingOrderEntry {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    pub fn ascending(column: Column) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: Column) -> Self {
        Self::new(column, SortDirection::Descending)
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_empty(&self) -> bool {
        self.direction == SortDirection::None
    }
}

impl PartialEq for SortingOrderEntry {
    fn eq(&self, other: &Self) -> bool {
        self.column.id() == other.column.id() && self.direction == other.direction
    }
}

/// An ordered list of sort keys. The first entry is the primary key.
///
/// Entries never carry [`SortDirection::None`] and each column appears at
/// most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortingOrder {
    entries: Vec<SortingOrderEntry>,
}

impl SortingOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an order from arbitrary entries: empty entries and repeated
    /// columns are dropped and, unless `multiple` is set, only the first
    /// remaining entry is kept.
    pub fn normalized(entries: impl IntoIterator<Item = SortingOrderEntry>, multiple: bool) -> Self {
        let mut out: Vec<SortingOrderEntry> = Vec::new();
        for entry in entries {
            if entry.is_empty() || out.iter().any(|e| e.column.id() == entry.column.id()) {
                continue;
            }
            out.push(entry);
        }
        if !multiple && out.len() > 1 {
            log::debug!("multiple sorting disabled, keeping only the primary entry");
            out.truncate(1);
        }
        Self { entries: out }
    }

    pub fn entries(&self) -> &[SortingOrderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direction currently applied to `column`.
    pub fn direction_of(&self, column: ColumnId) -> SortDirection {
        self.position_of(column)
            .map_or(SortDirection::None, |i| self.entries[i].direction)
    }

    /// Zero-based priority of `column` within the order.
    pub fn position_of(&self, column: ColumnId) -> Option<usize> {
        self.entries.iter().position(|e| e.column.id() == column)
    }

    /// The order that results from toggling `column`'s header.
    ///
    /// The column cycles absent, ascending, descending, absent. While
    /// `multiple` is off the result holds a single entry: the toggled column,
    /// or, when it was just removed, the first of the remaining entries.
    pub fn toggled(&self, column: &Column, multiple: bool) -> SortingOrder {
        let mut entries = self.entries.clone();
        match self.position_of(column.id()) {
            Some(pos) => match entries[pos].direction.next() {
                SortDirection::None => {
                    entries.remove(pos);
                    if !multiple {
                        entries.truncate(1);
                    }
                }
                direction => {
                    entries[pos].direction = direction;
                    if !multiple {
                        let entry = entries.swap_remove(pos);
                        entries = vec![entry];
                    }
                }
            },
            None => {
                let entry = SortingOrderEntry::ascending(Column::clone(column));
                if multiple {
                    entries.push(entry);
                } else {
                    entries = vec![entry];
                }
            }
        }
        SortingOrder { entries }
    }

    /// Drop entries whose column fails `keep`. Returns `true` if any entry
    /// was removed.
    pub fn retain_columns(&mut self, mut keep: impl FnMut(ColumnId) -> bool) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| keep(e.column.id()));
        self.entries.len() != before
    }

    /// The persistable form of this order, expressed as indices into
    /// `columns`. Entries whose column is missing from `columns` are skipped.
    pub fn to_state(&self, columns: &[Column]) -> SortingOrderState {
        let entries = self
            .entries
            .iter()
            .filter_map(|e| {
                columns
                    .iter()
                    .position(|c| c.id() == e.column.id())
                    .map(|column_index| SortingOrderStateEntry {
                        column_index,
                        direction: e.direction,
                    })
            })
            .collect();
        SortingOrderState { entries }
    }

    /// Rebuild an order from its persisted form.
    pub fn from_state(
        state: &SortingOrderState,
        columns: &[Column],
        multiple: bool,
    ) -> Result<SortingOrder, ListError> {
        let entries = state
            .entries
            .iter()
            .map(|e| {
                columns
                    .get(e.column_index)
                    .map(|c| SortingOrderEntry::new(Column::clone(c), e.direction))
                    .ok_or(ListError::ColumnIndexOutOfRange {
                        index: e.column_index,
                        len: columns.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SortingOrder::normalized(entries, multiple))
    }
}

/// A sorting order as `(column index, direction)` pairs, for hosts that
/// persist it between requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingOrderState {
    pub entries: Vec<SortingOrderStateEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingOrderStateEntry {
    pub column_index: usize,
    pub direction: SortDirection,
}

/// Payload of the sorting-order changing/changed notifications.
#[derive(Clone, Debug, PartialEq)]
pub struct SortingOrderChange {
    pub old: SortingOrder,
    pub new: SortingOrder,
}
