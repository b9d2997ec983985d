use crate::bound_value::ValidationFailure;
use boc_core::PropertyError;

/// Errors reported by [`BocList`](super::BocList) operations.
///
/// Index errors usually mean the host is replaying state from an earlier
/// request against a different column or row set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListError {
    #[error("column index {index} is out of range (0..{len})")]
    ColumnIndexOutOfRange { index: usize, len: usize },
    #[error("row index {index} is out of range (0..{len})")]
    RowIndexOutOfRange { index: usize, len: usize },
    #[error("column `{0}` is not part of the list")]
    UnknownColumn(String),
    #[error("column `{0}` is not sortable")]
    ColumnNotSortable(String),
    #[error("column `{0}` is not editable")]
    ColumnNotEditable(String),
    #[error("operation not allowed: {0}")]
    NotAllowed(&'static str),
    #[error("row {row} failed validation")]
    ValidationFailed {
        row: usize,
        failures: Vec<ValidationFailure>,
    },
    #[error(transparent)]
    Property(#[from] PropertyError),
}
