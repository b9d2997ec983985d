//! Column definitions for [`BocList`](super::BocList).

use boc_core::{BusinessObject, PropertyError, PropertyPath, Value};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_COLUMN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a column definition. Clones of the same [`Column`] share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u64);

impl ColumnId {
    fn next() -> Self {
        Self(NEXT_COLUMN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A shared column definition.
pub type Column = Arc<ColumnDefinition>;

/// Cell strategy for columns whose content is not a plain property.
pub trait CustomCell: Send + Sync {
    /// Value used as the primary sort key.
    fn sort_value(&self, object: &dyn BusinessObject) -> Result<Value, PropertyError>;

    /// Display text, also used as the secondary sort key.
    fn string_value(&self, object: &dyn BusinessObject) -> Result<String, PropertyError>;

    /// Validate the cell while its row is being saved.
    fn validate(&self, row_index: usize, object: &dyn BusinessObject) -> bool {
        let _ = (row_index, object);
        true
    }
}

/// How a column obtains its values.
#[derive(Clone)]
pub enum ColumnKind {
    /// One property path.
    Simple(PropertyPath),
    /// Several property paths compared lexicographically.
    Compound(Vec<PropertyPath>),
    /// An externally supplied cell strategy.
    Custom(Arc<dyn CustomCell>),
}

impl fmt::Debug for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Simple(path) => f.debug_tuple("Simple").field(path).finish(),
            ColumnKind::Compound(paths) => f.debug_tuple("Compound").field(paths).finish(),
            ColumnKind::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Capability tag of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnCapability {
    Simple,
    Compound,
    Custom,
}

/// Describes one column of a list.
///
/// Columns are built once and shared as [`Column`]; builder methods consume
/// the definition before it is wrapped.
///
/// ```rust,ignore
/// let name = ColumnDefinition::simple("Name", "Name")?.required(true).into_column();
/// let full = ColumnDefinition::compound("Full name", &["LastName", "Name"])?.into_column();
/// ```
#[derive(Debug)]
pub struct ColumnDefinition {
    id: ColumnId,
    title: String,
    kind: ColumnKind,
    sortable: bool,
    dynamic: bool,
    required: bool,
    read_only: bool,
}

impl ColumnDefinition {
    fn new(title: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            id: ColumnId::next(),
            title: title.into(),
            kind,
            sortable: true,
            dynamic: false,
            required: false,
            read_only: false,
        }
    }

    /// A column bound to a single property path.
    pub fn simple(title: impl Into<String>, path: &str) -> Result<Self, PropertyError> {
        Ok(Self::new(title, ColumnKind::Simple(PropertyPath::parse(path)?)))
    }

    /// A column combining several property paths. At least one is required.
    pub fn compound(title: impl Into<String>, paths: &[&str]) -> Result<Self, PropertyError> {
        if paths.is_empty() {
            return Err(PropertyError::InvalidPath(String::new()));
        }
        let paths = paths
            .iter()
            .map(|p| PropertyPath::parse(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(title, ColumnKind::Compound(paths)))
    }

    /// A column delegating to a [`CustomCell`]. Custom columns are read-only.
    pub fn custom(title: impl Into<String>, cell: impl CustomCell + 'static) -> Self {
        let mut column = Self::new(title, ColumnKind::Custom(Arc::new(cell)));
        column.read_only = true;
        column
    }

    /// Whether clicking the header may sort by this column. Default `true`.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Resolve property paths against each object's runtime class instead of
    /// once for the whole list. Default `false`.
    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Whether an edited value may be left empty. Default `false`.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Exclude the column from edit mode. Default `false`.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn into_column(self) -> Column {
        Arc::new(self)
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    pub fn capability(&self) -> ColumnCapability {
        match self.kind {
            ColumnKind::Simple(_) => ColumnCapability::Simple,
            ColumnKind::Compound(_) => ColumnCapability::Compound,
            ColumnKind::Custom(_) => ColumnCapability::Custom,
        }
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The property path edited through this column, if it has one.
    pub fn edit_path(&self) -> Option<&PropertyPath> {
        match &self.kind {
            ColumnKind::Simple(path) if !self.read_only => Some(path),
            _ => None,
        }
    }

    /// The custom cell strategy, for custom columns.
    pub fn custom_cell(&self) -> Option<&dyn CustomCell> {
        match &self.kind {
            ColumnKind::Custom(cell) => Some(cell.as_ref()),
            _ => None,
        }
    }
}
