//! Edit-mode state of a list.
//!
//! A list is read-only, has exactly one row in edit mode, or has every row in
//! edit mode. Each editable row stages its changes in [`BoundValue`]s and only
//! writes them to the business object once the whole row validates.

use super::column::{Column, ColumnId};
use crate::bound_value::{BoundValue, ValidationFailure};
use boc_core::{BusinessObject, PropertyError, PropertyResolver, Value};

/// Pending edits of one row, one bound value per editable column.
#[derive(Debug, Clone)]
pub struct EditableRow {
    index: usize,
    controls: Vec<(ColumnId, BoundValue)>,
}

impl EditableRow {
    /// Bind every editable simple column of `columns` for the row at `index`.
    pub(crate) fn new(index: usize, columns: &[Column]) -> Self {
        let controls = columns
            .iter()
            .filter_map(|c| {
                c.edit_path().map(|path| {
                    let control = BoundValue::new(path.clone())
                        .with_required(c.is_required())
                        .with_dynamic(c.is_dynamic());
                    (c.id(), control)
                })
            })
            .collect();
        Self { index, controls }
    }

    /// Index of the edited object in the bound list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn controls(&self) -> impl Iterator<Item = (ColumnId, &BoundValue)> {
        self.controls.iter().map(|(id, c)| (*id, c))
    }

    pub fn control(&self, column: ColumnId) -> Option<&BoundValue> {
        self.controls
            .iter()
            .find(|(id, _)| *id == column)
            .map(|(_, c)| c)
    }

    pub fn is_dirty(&self) -> bool {
        self.controls.iter().any(|(_, c)| c.is_dirty())
    }

    /// Stage a new value for `column`. Returns `None` if the column is not
    /// edited in this row.
    pub(crate) fn set_value(&mut self, column: ColumnId, value: Value) -> Option<bool> {
        self.controls
            .iter_mut()
            .find(|(id, _)| *id == column)
            .map(|(_, c)| c.set_value(value))
    }

    /// Drop controls whose column is no longer in the active set.
    pub(crate) fn retain_columns(&mut self, mut keep: impl FnMut(ColumnId) -> bool) {
        self.controls.retain(|(id, _)| keep(*id));
    }

    pub(crate) fn load(
        &mut self,
        object: &dyn BusinessObject,
        resolver: &mut PropertyResolver,
        interim: bool,
    ) -> Result<(), PropertyError> {
        for (_, control) in &mut self.controls {
            control.load_value(object, resolver, interim)?;
        }
        Ok(())
    }

    /// Run the row's own validation: every bound value, then every custom
    /// column against the current object.
    pub(crate) fn validate(
        &self,
        object: &dyn BusinessObject,
        columns: &[Column],
    ) -> Vec<ValidationFailure> {
        let mut failures: Vec<ValidationFailure> = self
            .controls
            .iter()
            .filter_map(|(_, c)| c.validate().err())
            .collect();
        for column in columns {
            if let Some(cell) = column.custom_cell() {
                if !cell.validate(self.index, object) {
                    failures.push(ValidationFailure::Custom {
                        column: column.title().to_string(),
                    });
                }
            }
        }
        failures
    }

    /// Write pending values and return the positions of the controls that
    /// wrote something. If a write fails, the controls already written are
    /// reverted before the error is returned.
    pub(crate) fn save(
        &mut self,
        object: &mut dyn BusinessObject,
        resolver: &mut PropertyResolver,
    ) -> Result<Vec<usize>, PropertyError> {
        let mut written = Vec::new();
        for pos in 0..self.controls.len() {
            match self.controls[pos].1.save_value(object, resolver) {
                Ok(true) => written.push(pos),
                Ok(false) => {}
                Err(err) => {
                    self.revert(&written, object, resolver);
                    return Err(err);
                }
            }
        }
        Ok(written)
    }

    /// Restore the loaded values of the controls at `written`, last first.
    /// The reverted controls keep their pending values.
    pub(crate) fn revert(
        &mut self,
        written: &[usize],
        object: &mut dyn BusinessObject,
        resolver: &mut PropertyResolver,
    ) {
        for &pos in written.iter().rev() {
            let (_, control) = &mut self.controls[pos];
            if let Err(err) = control.revert_value(object, resolver) {
                log::warn!(
                    "row {}: cannot restore `{}`: {err}",
                    self.index,
                    control.path()
                );
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum EditMode {
    #[default]
    ReadOnly,
    RowEditing(EditableRow),
    ListEditing(Vec<EditableRow>),
}

impl EditMode {
    pub fn is_read_only(&self) -> bool {
        matches!(self, EditMode::ReadOnly)
    }

    pub fn is_list_editing(&self) -> bool {
        matches!(self, EditMode::ListEditing(_))
    }

    /// Index of the row in row edit mode.
    pub fn editing_row(&self) -> Option<usize> {
        match self {
            EditMode::RowEditing(row) => Some(row.index),
            _ => None,
        }
    }

    /// The pending edits for the row at `index`, in either edit mode.
    pub fn row(&self, index: usize) -> Option<&EditableRow> {
        match self {
            EditMode::ReadOnly => None,
            EditMode::RowEditing(row) => (row.index == index).then_some(row),
            EditMode::ListEditing(rows) => rows.iter().find(|r| r.index == index),
        }
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> Option<&mut EditableRow> {
        match self {
            EditMode::ReadOnly => None,
            EditMode::RowEditing(row) => (row.index == index).then_some(row),
            EditMode::ListEditing(rows) => rows.iter_mut().find(|r| r.index == index),
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [EditableRow] {
        match self {
            EditMode::ReadOnly => &mut [],
            EditMode::RowEditing(row) => std::slice::from_mut(row),
            EditMode::ListEditing(rows) => rows,
        }
    }
}

/// Result of ending an edit mode.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Pending values were validated and written.
    Saved,
    /// Pending values were discarded.
    Canceled,
    /// Validation failed; the edit mode is unchanged.
    Invalid(Vec<ValidationFailure>),
    /// Nothing was being edited.
    NotEditing,
}
