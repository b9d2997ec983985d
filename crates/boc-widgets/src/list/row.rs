//! Row wrappers and the comparison that orders them.
//!
//! A [`Row`] pairs the position of a business object in the bound list with a
//! small cache of values extracted from it. Each value or display string is
//! computed at most once per row while the row lives; rows are rebuilt
//! whenever the bound data or the sorting order changes.

use super::column::{ColumnDefinition, ColumnId, ColumnKind};
use super::sorting::SortingOrder;
use boc_core::{BusinessObject, PropertyResolver, Value};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Cache slot: a whole column (`part == None`) or one sub-binding of a
/// compound column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CacheKey {
    column: ColumnId,
    part: Option<usize>,
}

#[derive(Clone, Debug)]
struct CacheEntry {
    key: CacheKey,
    value: Option<Value>,
    text: Option<String>,
}

/// One business object of the bound list, identified by its original index.
#[derive(Clone, Debug, Default)]
pub struct Row {
    index: usize,
    cache: SmallVec<[CacheEntry; 4]>,
}

impl Row {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            cache: SmallVec::new(),
        }
    }

    /// Position of the object in the unsorted, unpaged bound list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of memoized values and strings.
    pub fn cached_len(&self) -> usize {
        self.cache
            .iter()
            .map(|e| usize::from(e.value.is_some()) + usize::from(e.text.is_some()))
            .sum()
    }

    fn slot(&mut self, key: CacheKey) -> &mut CacheEntry {
        let pos = match self.cache.iter().position(|e| e.key == key) {
            Some(pos) => pos,
            None => {
                self.cache.push(CacheEntry {
                    key,
                    value: None,
                    text: None,
                });
                self.cache.len() - 1
            }
        };
        &mut self.cache[pos]
    }

    fn peek(&self, key: CacheKey) -> Option<&CacheEntry> {
        self.cache.iter().find(|e| e.key == key)
    }

    fn cached_value(&self, key: CacheKey) -> &Value {
        const NULL: &Value = &Value::Null;
        self.peek(key).and_then(|e| e.value.as_ref()).unwrap_or(NULL)
    }

    fn cached_text(&self, key: CacheKey) -> &str {
        self.peek(key)
            .and_then(|e| e.text.as_deref())
            .unwrap_or_default()
    }
}

/// The rows visible on the current page, in display order.
#[derive(Clone, Copy, Debug)]
pub struct RowWindow<'a> {
    start: usize,
    rows: &'a [Row],
    total: usize,
}

impl<'a> RowWindow<'a> {
    pub(crate) fn new(start: usize, rows: &'a [Row], total: usize) -> Self {
        Self { start, rows, total }
    }

    /// Position of the first visible row in the sorted sequence.
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn rows(&self) -> &'a [Row] {
        self.rows
    }

    /// Number of rows across all pages.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Original indices of the visible rows.
    pub fn indices(&self) -> impl Iterator<Item = usize> + 'a {
        self.rows.iter().map(Row::index)
    }
}

/// Everything a comparison needs besides the rows themselves.
pub(crate) struct RowSource<'a, T> {
    pub items: &'a [T],
    pub resolver: &'a mut PropertyResolver,
}

impl<T: BusinessObject> RowSource<'_, T> {
    fn ensure_value(&mut self, row: &mut Row, column: &ColumnDefinition, part: Option<usize>) {
        let key = CacheKey {
            column: column.id(),
            part,
        };
        if row.slot(key).value.is_some() {
            return;
        }
        let value = extract_value(&self.items[row.index], row.index, column, part, self.resolver);
        row.slot(key).value = Some(value);
    }

    fn ensure_text(&mut self, row: &mut Row, column: &ColumnDefinition, part: Option<usize>) {
        let key = CacheKey {
            column: column.id(),
            part,
        };
        if row.slot(key).text.is_some() {
            return;
        }
        let text = match column.kind() {
            ColumnKind::Custom(_) => {
                extract_text(&self.items[row.index], row.index, column, self.resolver)
            }
            ColumnKind::Simple(_) => {
                self.ensure_value(row, column, part);
                row.cached_value(key).to_string()
            }
            ColumnKind::Compound(paths) => match part {
                Some(_) => {
                    self.ensure_value(row, column, part);
                    row.cached_value(key).to_string()
                }
                None => {
                    let mut parts = Vec::with_capacity(paths.len());
                    for i in 0..paths.len() {
                        self.ensure_text(row, column, Some(i));
                        parts.push(
                            row.cached_text(CacheKey {
                                column: column.id(),
                                part: Some(i),
                            })
                            .to_string(),
                        );
                    }
                    join_parts(parts)
                }
            },
        };
        row.slot(key).text = Some(text);
    }

    /// Compare two rows by one column, ascending.
    fn compare_by_column(
        &mut self,
        rows: &mut [Row],
        a: usize,
        b: usize,
        column: &ColumnDefinition,
    ) -> Ordering {
        let parts = match column.kind() {
            ColumnKind::Compound(paths) => paths.len(),
            _ => 0,
        };
        for part in (0..parts).map(Some) {
            let ordering = self.compare_values(rows, a, b, column, part);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        if parts == 0 {
            let ordering = self.compare_values(rows, a, b, column, None);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        self.compare_texts(rows, a, b, column, None)
    }

    /// Value comparison, then string comparison for one sub-binding. Whole
    /// columns only compare values here.
    fn compare_values(
        &mut self,
        rows: &mut [Row],
        a: usize,
        b: usize,
        column: &ColumnDefinition,
        part: Option<usize>,
    ) -> Ordering {
        self.ensure_value(&mut rows[a], column, part);
        self.ensure_value(&mut rows[b], column, part);
        let key = CacheKey {
            column: column.id(),
            part,
        };
        let ordering = rows[a].cached_value(key).sort_cmp(rows[b].cached_value(key));
        if ordering != Ordering::Equal || part.is_none() {
            return ordering;
        }
        self.compare_texts(rows, a, b, column, part)
    }

    fn compare_texts(
        &mut self,
        rows: &mut [Row],
        a: usize,
        b: usize,
        column: &ColumnDefinition,
        part: Option<usize>,
    ) -> Ordering {
        self.ensure_text(&mut rows[a], column, part);
        self.ensure_text(&mut rows[b], column, part);
        let key = CacheKey {
            column: column.id(),
            part,
        };
        rows[a].cached_text(key).cmp(rows[b].cached_text(key))
    }

    /// Total order over rows for `order`: entries in priority order, then
    /// the original index.
    pub(crate) fn compare_rows(
        &mut self,
        rows: &mut [Row],
        a: usize,
        b: usize,
        order: &SortingOrder,
    ) -> Ordering {
        for entry in order.entries() {
            if entry.is_empty() {
                continue;
            }
            let ordering = self.compare_by_column(rows, a, b, entry.column());
            let ordering = entry.direction().apply(ordering);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        rows[a].index.cmp(&rows[b].index)
    }

    /// Wrap every item and order the rows by `order`.
    pub(crate) fn build_rows(&mut self, order: &SortingOrder) -> Vec<Row> {
        let mut rows: Vec<Row> = (0..self.items.len()).map(Row::new).collect();
        if order.is_empty() || rows.len() < 2 {
            return rows;
        }
        let mut permutation: Vec<usize> = (0..rows.len()).collect();
        merge_sort(&mut permutation, |a, b| self.compare_rows(&mut rows, a, b, order));
        let mut sorted = Vec::with_capacity(rows.len());
        for i in permutation {
            sorted.push(std::mem::take(&mut rows[i]));
        }
        sorted
    }

    /// Display text of `column` for the item at `index`, without caching.
    pub(crate) fn display_text(&mut self, index: usize, column: &ColumnDefinition) -> String {
        let item = &self.items[index];
        match column.kind() {
            ColumnKind::Simple(_) => {
                extract_value(item, index, column, None, self.resolver).to_string()
            }
            ColumnKind::Compound(paths) => join_parts(
                (0..paths.len())
                    .map(|i| extract_value(item, index, column, Some(i), self.resolver).to_string())
                    .collect(),
            ),
            ColumnKind::Custom(_) => extract_text(item, index, column, self.resolver),
        }
    }
}

/// Stable bottom-up merge sort of a permutation.
///
/// Row comparison is not guaranteed to be transitive (values of kinds that
/// cannot be compared fall back to their display text), so `slice::sort_by`
/// is off limits: it may panic on such a comparator. This sort always
/// terminates with some permutation and keeps equal elements in order.
fn merge_sort(permutation: &mut Vec<usize>, mut compare: impl FnMut(usize, usize) -> Ordering) {
    let len = permutation.len();
    let mut buffer = vec![0; len];
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut i, mut j, mut k) = (start, mid, start);
            while i < mid && j < end {
                if compare(permutation[j], permutation[i]) == Ordering::Less {
                    buffer[k] = permutation[j];
                    j += 1;
                } else {
                    buffer[k] = permutation[i];
                    i += 1;
                }
                k += 1;
            }
            let rest = mid - i;
            buffer[k..k + rest].copy_from_slice(&permutation[i..mid]);
            buffer[k + rest..end].copy_from_slice(&permutation[j..end]);
            start = end;
        }
        std::mem::swap(permutation, &mut buffer);
        width *= 2;
    }
}

fn join_parts(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a column's sort value, logging and substituting `Null` on failure.
fn extract_value<T: BusinessObject>(
    item: &T,
    index: usize,
    column: &ColumnDefinition,
    part: Option<usize>,
    resolver: &mut PropertyResolver,
) -> Value {
    let result = match (column.kind(), part) {
        (ColumnKind::Simple(path), _) => resolver.get(item, path, column.is_dynamic()),
        (ColumnKind::Compound(paths), Some(i)) => match paths.get(i) {
            Some(path) => resolver.get(item, path, column.is_dynamic()),
            None => Ok(Value::Null),
        },
        (ColumnKind::Compound(_), None) => Ok(Value::Null),
        (ColumnKind::Custom(cell), _) => cell.sort_value(item),
    };
    result.unwrap_or_else(|err| {
        log::warn!(
            "row {index}: cannot read value of column `{}`: {err}",
            column.title()
        );
        Value::Null
    })
}

/// Read a custom column's display text, logging and substituting an empty
/// string on failure.
fn extract_text<T: BusinessObject>(
    item: &T,
    index: usize,
    column: &ColumnDefinition,
    resolver: &mut PropertyResolver,
) -> String {
    match column.kind() {
        ColumnKind::Custom(cell) => cell.string_value(item).unwrap_or_else(|err| {
            log::warn!(
                "row {index}: cannot read text of column `{}`: {err}",
                column.title()
            );
            String::new()
        }),
        _ => extract_value(item, index, column, None, resolver).to_string(),
    }
}
