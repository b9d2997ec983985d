//! Sortable, pageable, editable list of business objects.
//!
//! [`BocList`] binds a `Vec` of [`BusinessObject`]s to a set of
//! [columns](column::ColumnDefinition). It orders the objects by a multi-key
//! [`SortingOrder`], cuts the ordered rows into pages and lets the host edit
//! one row (row edit mode) or every row (list edit mode) at a time.
//!
//! ```rust,ignore
//! let mut list = BocList::new(people, vec![name, age]);
//! list.toggle_sort(1)?;
//! let window = list.rows_to_display();
//! for index in window.indices() {
//!     println!("{}", list.items()[index].display_name());
//! }
//! ```
//!
//! The sorted row sequence is built lazily and kept until the bound items,
//! the sorting order or an edited row change.

pub mod column;
mod edit;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
mod options;
mod row;
mod sorting;

pub use column::{Column, ColumnCapability, ColumnDefinition, ColumnId, ColumnKind, CustomCell};
pub use edit::{EditMode, EditOutcome, EditableRow};
pub use error::ListError;
pub use options::ListOptions;
pub use row::{Row, RowWindow};
pub use sorting::{
    SortDirection, SortingOrder, SortingOrderChange, SortingOrderEntry, SortingOrderState,
    SortingOrderStateEntry,
};

use crate::paginator::Paginator;
use boc_core::{BusinessObject, Command, Component, Notifier, PropertyResolver, Value};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row as TableRow, Table, TableState};
use ratatui::Frame;
use row::RowSource;

type RowValidator<T> = Box<dyn Fn(usize, &T, &EditableRow) -> bool + Send>;

/// Messages for the list component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Toggle the sort direction of the column at the given index.
    ToggleSort(usize),
    ClearSortingOrder,
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    GoToPage(usize),
    /// Put the row with the given item index into edit mode.
    EditRow(usize),
    SaveRow,
    CancelRow,
    EditList,
    SaveList,
    CancelList,

    // Follow-ups produced by `update`.
    SortingOrderChanged,
    PageChanged(usize),
    RowEditModeEnded { index: usize, saved: bool },
    ListEditModeEnded { saved: bool },
    OperationFailed(ListError),
}

#[derive(Debug, Clone)]
pub struct ListStyle {
    pub header: Style,
    pub normal: Style,
    /// Style of the current row.
    pub current: Style,
    /// Style of cells showing a pending edit.
    pub editing: Style,
    pub border: Style,
    pub highlight_symbol: String,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            normal: Style::default(),
            current: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            editing: Style::default().add_modifier(Modifier::UNDERLINED),
            border: Style::default().fg(Color::DarkGray),
            highlight_symbol: "▸ ".to_string(),
        }
    }
}

/// A list control bound to business objects of type `T`.
///
/// Use `BocList<Box<dyn BusinessObject>>` to bind objects of different
/// classes; mark columns [`dynamic`](ColumnDefinition::dynamic) when their
/// property layout differs per class.
pub struct BocList<T: BusinessObject + 'static> {
    items: Vec<T>,
    fixed_columns: Vec<Column>,
    view_columns: Vec<Column>,
    options: ListOptions,
    sorting_order: SortingOrder,
    sorted_rows: Option<Vec<Row>>,
    resolver: PropertyResolver,
    paginator: Paginator,
    edit: EditMode,
    validator: Option<RowValidator<T>>,
    sorting_order_changing: Notifier<SortingOrderChange>,
    sorting_order_changed: Notifier<SortingOrderChange>,
    title: String,
    style: ListStyle,
}

impl<T: BusinessObject + 'static> BocList<T> {
    /// Create a list over `items` with the given fixed columns and default
    /// [`ListOptions`].
    pub fn new(items: Vec<T>, columns: Vec<Column>) -> Self {
        let options = ListOptions::default();
        let paginator = Paginator::new(options.page_size, items.len());
        Self {
            items,
            fixed_columns: columns,
            view_columns: Vec::new(),
            options,
            sorting_order: SortingOrder::new(),
            sorted_rows: None,
            resolver: PropertyResolver::new(),
            paginator,
            edit: EditMode::ReadOnly,
            validator: None,
            sorting_order_changing: Notifier::new(),
            sorting_order_changed: Notifier::new(),
            title: String::new(),
            style: ListStyle::default(),
        }
    }

    pub fn with_options(mut self, options: ListOptions) -> Result<Self, ListError> {
        self.set_options(options)?;
        Ok(self)
    }

    pub fn with_view_columns(mut self, columns: Vec<Column>) -> Self {
        self.set_view_columns(columns);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_style(mut self, style: ListStyle) -> Self {
        self.style = style;
        self
    }

    /// Register the host's row validation. It runs after the built-in and
    /// custom-column validation whenever an edited row is saved.
    pub fn set_row_validator(
        &mut self,
        validator: impl Fn(usize, &T, &EditableRow) -> bool + Send + 'static,
    ) {
        self.validator = Some(Box::new(validator));
    }

    // ── Data ──

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Rebind the list. Pending edits are discarded.
    pub fn set_items(&mut self, items: Vec<T>) {
        if !self.edit.is_read_only() {
            log::debug!("rebinding list, discarding pending edits");
            self.edit = EditMode::ReadOnly;
        }
        self.items = items;
        self.resolver.clear();
        self.data_changed();
    }

    /// Append `item` and return its index. In list edit mode the new row
    /// is editable too.
    pub fn add_row(&mut self, item: T) -> Result<usize, ListError> {
        let index = self.items.len();
        if self.edit.is_list_editing() {
            let mut row = EditableRow::new(index, &self.columns());
            row.load(&item, &mut self.resolver, false)?;
            if let EditMode::ListEditing(rows) = &mut self.edit {
                rows.push(row);
            }
        }
        self.items.push(item);
        self.data_changed();
        Ok(index)
    }

    /// Append `item` and put it into row edit mode. A row already in edit
    /// mode is saved first; if it fails validation nothing is added.
    pub fn add_and_edit_row(&mut self, item: T) -> Result<usize, ListError> {
        if self.edit.is_list_editing() {
            return self.add_row(item);
        }
        if !self.options.row_edit_mode_enabled {
            return Err(ListError::NotAllowed("row edit mode is disabled"));
        }
        self.finish_row_edit_for_switch()?;
        let index = self.add_row(item)?;
        self.switch_row_into_edit_mode(index)?;
        Ok(index)
    }

    /// Remove and return the item at `index`. Its pending edits are
    /// discarded; edits of later rows move with their rows.
    pub fn remove_row(&mut self, index: usize) -> Result<T, ListError> {
        self.check_row(index)?;
        match &mut self.edit {
            EditMode::ReadOnly => {}
            EditMode::RowEditing(row) => {
                if row.index() == index {
                    log::debug!("row {index} removed while in edit mode");
                    self.edit = EditMode::ReadOnly;
                } else if row.index() > index {
                    row.set_index(row.index() - 1);
                }
            }
            EditMode::ListEditing(rows) => {
                rows.retain(|r| r.index() != index);
                for row in rows.iter_mut().filter(|r| r.index() > index) {
                    row.set_index(row.index() - 1);
                }
            }
        }
        let item = self.items.remove(index);
        self.data_changed();
        Ok(item)
    }

    /// Write `value` into the property bound by a column, outside edit mode.
    pub fn replace_value(
        &mut self,
        index: usize,
        column_index: usize,
        value: Value,
    ) -> Result<(), ListError> {
        self.check_row(index)?;
        if self.edit.row(index).is_some() {
            return Err(ListError::NotAllowed("the row is in edit mode"));
        }
        let column = Column::clone(self.column(column_index)?);
        let path = column
            .edit_path()
            .ok_or_else(|| ListError::ColumnNotEditable(column.title().to_string()))?;
        self.resolver.set(&mut self.items[index], path, value)?;
        self.invalidate();
        Ok(())
    }

    // ── Columns ──

    /// The active columns: fixed columns followed by view columns.
    pub fn columns(&self) -> Vec<Column> {
        self.fixed_columns
            .iter()
            .chain(&self.view_columns)
            .cloned()
            .collect()
    }

    pub fn column(&self, index: usize) -> Result<&Column, ListError> {
        let len = self.fixed_columns.len() + self.view_columns.len();
        self.fixed_columns
            .iter()
            .chain(&self.view_columns)
            .nth(index)
            .ok_or(ListError::ColumnIndexOutOfRange { index, len })
    }

    pub fn set_fixed_columns(&mut self, columns: Vec<Column>) {
        self.fixed_columns = columns;
        self.columns_changed();
    }

    pub fn set_view_columns(&mut self, columns: Vec<Column>) {
        self.view_columns = columns;
        self.columns_changed();
    }

    fn contains_column(&self, id: ColumnId) -> bool {
        self.fixed_columns
            .iter()
            .chain(&self.view_columns)
            .any(|c| c.id() == id)
    }

    fn columns_changed(&mut self) {
        let active: Vec<ColumnId> = self.columns().iter().map(|c| c.id()).collect();
        let mut order = self.sorting_order.clone();
        if order.retain_columns(|id| active.contains(&id)) {
            log::debug!("dropping sorting entries of removed columns");
            self.apply_sorting_order(order);
        }
        for row in self.edit.rows_mut() {
            row.retain_columns(|id| active.contains(&id));
        }
    }

    // ── Options ──

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    /// Apply new options. Paging cannot be turned on while the list is in
    /// edit mode.
    pub fn set_options(&mut self, options: ListOptions) -> Result<(), ListError> {
        if options.page_size > 0 && self.edit.is_list_editing() {
            return Err(ListError::NotAllowed("paging while the list is in edit mode"));
        }
        let multiple = options.enable_multiple_sorting;
        self.paginator.set_page_size(options.page_size);
        self.options = options;
        if !multiple && self.sorting_order.len() > 1 {
            let order = SortingOrder::normalized(self.sorting_order.entries().to_vec(), false);
            self.apply_sorting_order(order);
        }
        self.invalidate();
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    // ── Sorting ──

    pub fn sorting_order(&self) -> &SortingOrder {
        &self.sorting_order
    }

    /// Callbacks raised before the sorting order changes.
    pub fn sorting_order_changing(&mut self) -> &mut Notifier<SortingOrderChange> {
        &mut self.sorting_order_changing
    }

    /// Callbacks raised after the sorting order changed.
    pub fn sorting_order_changed(&mut self) -> &mut Notifier<SortingOrderChange> {
        &mut self.sorting_order_changed
    }

    /// Cycle the sort direction of the column at `column_index`:
    /// absent, ascending, descending, absent.
    pub fn toggle_sort(&mut self, column_index: usize) -> Result<(), ListError> {
        if !self.options.enable_sorting {
            return Err(ListError::NotAllowed("sorting is disabled"));
        }
        let column = Column::clone(self.column(column_index)?);
        if !column.is_sortable() {
            return Err(ListError::ColumnNotSortable(column.title().to_string()));
        }
        let order = self
            .sorting_order
            .toggled(&column, self.options.enable_multiple_sorting);
        self.apply_sorting_order(order);
        Ok(())
    }

    /// Replace the sorting order. Returns `true` if it changed.
    pub fn set_sorting_order(
        &mut self,
        entries: impl IntoIterator<Item = SortingOrderEntry>,
    ) -> Result<bool, ListError> {
        let entries: Vec<SortingOrderEntry> = entries.into_iter().collect();
        for entry in entries.iter().filter(|e| !e.is_empty()) {
            let column = entry.column();
            if !self.contains_column(column.id()) {
                return Err(ListError::UnknownColumn(column.title().to_string()));
            }
            if !column.is_sortable() {
                return Err(ListError::ColumnNotSortable(column.title().to_string()));
            }
        }
        let order = SortingOrder::normalized(entries, self.options.enable_multiple_sorting);
        Ok(self.apply_sorting_order(order))
    }

    /// Remove every sorting entry. Returns `true` if there were any.
    pub fn clear_sorting_order(&mut self) -> bool {
        self.apply_sorting_order(SortingOrder::new())
    }

    /// The sorting order as `(column index, direction)` pairs.
    pub fn sorting_order_state(&self) -> SortingOrderState {
        self.sorting_order.to_state(&self.columns())
    }

    /// Restore a sorting order saved with
    /// [`sorting_order_state`](Self::sorting_order_state).
    pub fn restore_sorting_order(&mut self, state: &SortingOrderState) -> Result<bool, ListError> {
        let columns = self.columns();
        let order =
            SortingOrder::from_state(state, &columns, self.options.enable_multiple_sorting)?;
        if let Some(entry) = order.entries().iter().find(|e| !e.column().is_sortable()) {
            return Err(ListError::ColumnNotSortable(entry.column().title().to_string()));
        }
        Ok(self.apply_sorting_order(order))
    }

    fn apply_sorting_order(&mut self, order: SortingOrder) -> bool {
        if order == self.sorting_order {
            return false;
        }
        let change = SortingOrderChange {
            old: self.sorting_order.clone(),
            new: order,
        };
        self.sorting_order_changing.emit(&change);
        log::debug!(
            "sorting order changed: {} -> {} entries",
            change.old.len(),
            change.new.len()
        );
        self.sorting_order = change.new.clone();
        self.invalidate();
        self.paginator.set_row_count(self.items.len());
        self.sorting_order_changed.emit(&change);
        true
    }

    // ── Rows ──

    /// The rows of the current page in display order.
    pub fn rows_to_display(&mut self) -> RowWindow<'_> {
        self.ensure_sorted();
        let window = self.paginator.window();
        let rows = self.sorted_rows.as_deref().unwrap_or_default();
        let end = window.end.min(rows.len());
        let start = window.start.min(end);
        RowWindow::new(start, &rows[start..end], rows.len())
    }

    /// Position of the item at `index` in the sorted sequence.
    pub fn sorted_position(&mut self, index: usize) -> Option<usize> {
        self.ensure_sorted();
        self.sorted_rows
            .as_deref()?
            .iter()
            .position(|r| r.index() == index)
    }

    /// Drop the sorted rows and every memoized value.
    pub fn invalidate(&mut self) {
        if self.sorted_rows.take().is_some() {
            log::trace!("sorted rows invalidated");
        }
    }

    fn ensure_sorted(&mut self) {
        if self.sorted_rows.is_some() {
            return;
        }
        let rows = sort_rows(
            &self.items,
            &self.sorting_order,
            self.options.enable_sorting,
            &mut self.resolver,
        );
        log::trace!("sorted {} rows", rows.len());
        self.sorted_rows = Some(rows);
    }

    fn data_changed(&mut self) {
        self.invalidate();
        self.paginator.set_row_count(self.items.len());
    }

    fn check_row(&self, index: usize) -> Result<(), ListError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ListError::RowIndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    // ── Paging ──

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// Change the page size; `0` disables paging. Paging cannot be turned
    /// on while the list is in edit mode.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ListError> {
        if page_size > 0 && self.edit.is_list_editing() {
            return Err(ListError::NotAllowed("paging while the list is in edit mode"));
        }
        self.options.page_size = page_size;
        self.paginator.set_page_size(page_size);
        Ok(())
    }

    pub fn current_page(&self) -> usize {
        self.paginator.page()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count()
    }

    /// Position of the current row in the sorted sequence.
    pub fn current_row(&self) -> usize {
        self.paginator.current_row()
    }

    /// Item index of the current row, if the list is not empty.
    pub fn current_item_index(&mut self) -> Option<usize> {
        let position = self.paginator.current_row();
        self.ensure_sorted();
        self.sorted_rows
            .as_deref()?
            .get(position)
            .map(Row::index)
    }

    pub fn go_to_first_page(&mut self) {
        self.paginator.first_page();
    }

    pub fn go_to_previous_page(&mut self) {
        self.paginator.prev_page();
    }

    pub fn go_to_next_page(&mut self) {
        self.paginator.next_page();
    }

    pub fn go_to_last_page(&mut self) {
        self.paginator.last_page();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to_page(page);
    }

    /// Make the item at `index` the current row, wherever it sorts.
    fn follow_item(&mut self, index: usize) {
        if let Some(position) = self.sorted_position(index) {
            self.paginator.set_current_row(position);
        }
    }

    // ── Editing ──

    pub fn edit_mode(&self) -> &EditMode {
        &self.edit
    }

    /// Item index of the row in row edit mode.
    pub fn editing_row(&self) -> Option<usize> {
        self.edit.editing_row()
    }

    /// Put the row at `index` into edit mode.
    ///
    /// A different row already in edit mode is saved first; if it fails
    /// validation it stays in edit mode and this call fails with
    /// [`ListError::ValidationFailed`]. Rejected while the whole list is in
    /// edit mode.
    pub fn switch_row_into_edit_mode(&mut self, index: usize) -> Result<(), ListError> {
        if !self.options.row_edit_mode_enabled {
            return Err(ListError::NotAllowed("row edit mode is disabled"));
        }
        self.check_row(index)?;
        match &self.edit {
            EditMode::ListEditing(_) => {
                return Err(ListError::NotAllowed("the list is in edit mode"));
            }
            EditMode::RowEditing(row) if row.index() == index => return Ok(()),
            _ => {}
        }
        self.finish_row_edit_for_switch()?;

        let columns = self.columns();
        let mut row = EditableRow::new(index, &columns);
        row.load(&self.items[index], &mut self.resolver, false)?;
        self.edit = EditMode::RowEditing(row);
        self.follow_item(index);
        log::debug!("row {index} switched into edit mode");
        Ok(())
    }

    /// Save the row in edit mode, turning an invalid row into an error.
    fn finish_row_edit_for_switch(&mut self) -> Result<(), ListError> {
        let Some(prior) = self.edit.editing_row() else {
            return Ok(());
        };
        match self.end_row_edit_mode(true)? {
            EditOutcome::Invalid(failures) => Err(ListError::ValidationFailed {
                row: prior,
                failures,
            }),
            _ => Ok(()),
        }
    }

    /// Leave row edit mode, writing the pending values when `save` is set.
    ///
    /// A save only happens once every control, every custom column and the
    /// row validator accept the row; otherwise the row stays in edit mode
    /// and [`EditOutcome::Invalid`] is returned. Afterwards the current row
    /// follows the edited object to its new sorted position.
    pub fn end_row_edit_mode(&mut self, save: bool) -> Result<EditOutcome, ListError> {
        let mut row = match std::mem::take(&mut self.edit) {
            EditMode::RowEditing(row) => row,
            other => {
                self.edit = other;
                return Ok(EditOutcome::NotEditing);
            }
        };
        let index = row.index();
        if save {
            match self.commit(std::slice::from_mut(&mut row)) {
                Ok(()) => {}
                Err(ListError::ValidationFailed { failures, .. }) => {
                    log::debug!("row {index} failed validation, staying in edit mode");
                    self.edit = EditMode::RowEditing(row);
                    return Ok(EditOutcome::Invalid(failures));
                }
                Err(err) => {
                    self.edit = EditMode::RowEditing(row);
                    return Err(err);
                }
            }
        }
        self.invalidate();
        self.follow_item(index);
        log::debug!(
            "row {index} left edit mode ({})",
            if save { "saved" } else { "canceled" }
        );
        Ok(if save {
            EditOutcome::Saved
        } else {
            EditOutcome::Canceled
        })
    }

    /// Put every row into edit mode. Rejected while paging is enabled or a
    /// row is in edit mode.
    pub fn switch_list_into_edit_mode(&mut self) -> Result<(), ListError> {
        if !self.options.list_edit_mode_enabled {
            return Err(ListError::NotAllowed("list edit mode is disabled"));
        }
        if self.paginator.is_enabled() {
            return Err(ListError::NotAllowed("list edit mode while paging is enabled"));
        }
        match &self.edit {
            EditMode::RowEditing(_) => {
                return Err(ListError::NotAllowed("a row is in edit mode"));
            }
            EditMode::ListEditing(_) => return Ok(()),
            EditMode::ReadOnly => {}
        }
        let columns = self.columns();
        let mut rows = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.iter().enumerate() {
            let mut row = EditableRow::new(index, &columns);
            row.load(item, &mut self.resolver, false)?;
            rows.push(row);
        }
        self.edit = EditMode::ListEditing(rows);
        log::debug!("list switched into edit mode");
        Ok(())
    }

    /// Leave list edit mode. Nothing is written unless every row validates.
    pub fn end_list_edit_mode(&mut self, save: bool) -> Result<EditOutcome, ListError> {
        let mut rows = match std::mem::take(&mut self.edit) {
            EditMode::ListEditing(rows) => rows,
            other => {
                self.edit = other;
                return Ok(EditOutcome::NotEditing);
            }
        };
        if save {
            match self.commit(&mut rows) {
                Ok(()) => {}
                Err(ListError::ValidationFailed { failures, .. }) => {
                    self.edit = EditMode::ListEditing(rows);
                    return Ok(EditOutcome::Invalid(failures));
                }
                Err(err) => {
                    self.edit = EditMode::ListEditing(rows);
                    return Err(err);
                }
            }
        }
        self.invalidate();
        log::debug!("list left edit mode");
        Ok(if save {
            EditOutcome::Saved
        } else {
            EditOutcome::Canceled
        })
    }

    /// Stage `value` for a cell of a row in edit mode. Returns `true` if the
    /// pending value changed.
    pub fn set_edit_value(
        &mut self,
        index: usize,
        column_index: usize,
        value: Value,
    ) -> Result<bool, ListError> {
        let column = Column::clone(self.column(column_index)?);
        let not_editable = || ListError::ColumnNotEditable(column.title().to_string());
        if column.edit_path().is_none() {
            return Err(not_editable());
        }
        let row = self
            .edit
            .row_mut(index)
            .ok_or(ListError::NotAllowed("the row is not in edit mode"))?;
        row.set_value(column.id(), value).ok_or_else(not_editable)
    }

    /// Validate `rows` and, if all of them pass, write their pending values.
    fn commit(&mut self, rows: &mut [EditableRow]) -> Result<(), ListError> {
        let columns = self.columns();
        let mut first_invalid = None;
        let mut failures = Vec::new();
        for row in rows.iter() {
            let item = &self.items[row.index()];
            let mut row_failures = row.validate(item, &columns);
            if let Some(validator) = &self.validator {
                if !validator(row.index(), item, row) {
                    row_failures.push(crate::bound_value::ValidationFailure::Rejected);
                }
            }
            if !row_failures.is_empty() {
                first_invalid.get_or_insert(row.index());
                failures.extend(row_failures);
            }
        }
        if let Some(row) = first_invalid {
            return Err(ListError::ValidationFailed { row, failures });
        }
        let mut saved: Vec<(usize, Vec<usize>)> = Vec::with_capacity(rows.len());
        for pos in 0..rows.len() {
            let index = rows[pos].index();
            match rows[pos].save(&mut self.items[index], &mut self.resolver) {
                Ok(written) => saved.push((pos, written)),
                Err(err) => {
                    log::warn!("row {index} could not be saved, restoring earlier rows: {err}");
                    for (pos, written) in saved.iter().rev() {
                        let index = rows[*pos].index();
                        rows[*pos].revert(written, &mut self.items[index], &mut self.resolver);
                    }
                    self.invalidate();
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    // ── Component glue ──

    fn end_row_message(&mut self, save: bool) -> Result<Option<Message>, ListError> {
        let index = self.edit.editing_row();
        match self.end_row_edit_mode(save)? {
            EditOutcome::Invalid(failures) => Err(ListError::ValidationFailed {
                row: index.unwrap_or_default(),
                failures,
            }),
            EditOutcome::NotEditing => Ok(None),
            EditOutcome::Saved | EditOutcome::Canceled => {
                Ok(index.map(|index| Message::RowEditModeEnded { index, saved: save }))
            }
        }
    }

    fn end_list_message(&mut self, save: bool) -> Result<Option<Message>, ListError> {
        match self.end_list_edit_mode(save)? {
            EditOutcome::Invalid(failures) => Err(ListError::ValidationFailed {
                row: 0,
                failures,
            }),
            EditOutcome::NotEditing => Ok(None),
            EditOutcome::Saved | EditOutcome::Canceled => {
                Ok(Some(Message::ListEditModeEnded { saved: save }))
            }
        }
    }

    fn header_text(&self, column: &ColumnDefinition) -> String {
        let Some(position) = self.sorting_order.position_of(column.id()) else {
            return column.title().to_string();
        };
        let glyph = match self.sorting_order.direction_of(column.id()) {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
            SortDirection::None => "",
        };
        if self.sorting_order.len() > 1 {
            format!("{} {glyph}{}", column.title(), position + 1)
        } else {
            format!("{} {glyph}", column.title())
        }
    }
}

/// Wrap `items` in rows, sorted by `order` when sorting is enabled.
fn sort_rows<T: BusinessObject>(
    items: &[T],
    order: &SortingOrder,
    enable_sorting: bool,
    resolver: &mut PropertyResolver,
) -> Vec<Row> {
    let unsorted = SortingOrder::new();
    let order = if enable_sorting { order } else { &unsorted };
    RowSource { items, resolver }.build_rows(order)
}

impl<T: BusinessObject + 'static> Component for BocList<T> {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let page = self.current_page();
        let result = match msg {
            Message::ToggleSort(index) => self
                .toggle_sort(index)
                .map(|()| Some(Message::SortingOrderChanged)),
            Message::ClearSortingOrder => {
                Ok(self.clear_sorting_order().then_some(Message::SortingOrderChanged))
            }
            Message::FirstPage => {
                self.go_to_first_page();
                Ok(None)
            }
            Message::PreviousPage => {
                self.go_to_previous_page();
                Ok(None)
            }
            Message::NextPage => {
                self.go_to_next_page();
                Ok(None)
            }
            Message::LastPage => {
                self.go_to_last_page();
                Ok(None)
            }
            Message::GoToPage(n) => {
                self.go_to_page(n);
                Ok(None)
            }
            Message::EditRow(index) => self.switch_row_into_edit_mode(index).map(|()| None),
            Message::SaveRow => self.end_row_message(true),
            Message::CancelRow => self.end_row_message(false),
            Message::EditList => self.switch_list_into_edit_mode().map(|()| None),
            Message::SaveList => self.end_list_message(true),
            Message::CancelList => self.end_list_message(false),
            Message::SortingOrderChanged
            | Message::PageChanged(_)
            | Message::RowEditModeEnded { .. }
            | Message::ListEditModeEnded { .. }
            | Message::OperationFailed(_) => return Command::none(),
        };

        let mut cmds = Vec::new();
        match result {
            Ok(Some(follow_up)) => cmds.push(Command::message(follow_up)),
            Ok(None) => {}
            Err(err) => {
                log::debug!("list operation failed: {err}");
                cmds.push(Command::message(Message::OperationFailed(err)));
            }
        }
        let new_page = self.current_page();
        if new_page != page {
            cmds.push(Command::message(Message::PageChanged(new_page)));
        }
        Command::batch(cmds)
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (table_area, pager_area) = if self.paginator.is_enabled() {
            let [table, pager] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
            (table, Some(pager))
        } else {
            (area, None)
        };

        // `view` cannot fill the caches; sort with a scratch resolver when
        // nothing is cached yet.
        let mut resolver = PropertyResolver::new();
        let scratch;
        let rows: &[Row] = match &self.sorted_rows {
            Some(rows) => rows,
            None => {
                scratch = sort_rows(
                    &self.items,
                    &self.sorting_order,
                    self.options.enable_sorting,
                    &mut resolver,
                );
                &scratch
            }
        };
        let window = self.paginator.window();
        let end = window.end.min(rows.len());
        let start = window.start.min(end);

        let columns = self.columns();
        let header_cells: Vec<Cell> = columns
            .iter()
            .map(|c| Cell::from(self.header_text(c)).style(self.style.header))
            .collect();
        let header = TableRow::new(header_cells).height(1);

        let mut source = RowSource {
            items: &self.items,
            resolver: &mut resolver,
        };
        let table_rows: Vec<TableRow> = rows[start..end]
            .iter()
            .map(|row| {
                let pending = self.edit.row(row.index());
                let cells: Vec<Cell> = columns
                    .iter()
                    .map(|c| match pending.and_then(|p| p.control(c.id())) {
                        Some(control) => {
                            Cell::from(control.value().to_string()).style(self.style.editing)
                        }
                        None => Cell::from(source.display_text(row.index(), c)),
                    })
                    .collect();
                TableRow::new(cells).style(self.style.normal)
            })
            .collect();

        let widths: Vec<Constraint> = if columns.is_empty() {
            Vec::new()
        } else {
            let pct = (100 / columns.len()).max(1) as u16;
            vec![Constraint::Percentage(pct); columns.len()]
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style.border);
        if !self.title.is_empty() {
            block = block.title(self.title.as_str());
        }

        let table = Table::new(table_rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(self.style.current)
            .highlight_symbol(self.style.highlight_symbol.as_str());

        let mut state = TableState::default();
        let current = self.paginator.current_row();
        if (start..end).contains(&current) {
            state.select(Some(current - start));
        }
        frame.render_stateful_widget(table, table_area, &mut state);

        if let Some(pager_area) = pager_area {
            self.paginator.view(frame, pager_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bound_value::ValidationFailure;
    use crate::list::fixtures::{people, Person, Robot};
    use boc_core::testing::TestHarness;
    use boc_core::PropertyError;
    use std::sync::{Arc, Mutex};

    fn name_age_columns() -> Vec<Column> {
        vec![
            ColumnDefinition::simple("Name", "Name")
                .unwrap()
                .required(true)
                .into_column(),
            ColumnDefinition::simple("Age", "Age").unwrap().into_column(),
        ]
    }

    fn sample() -> BocList<Person> {
        BocList::new(
            people(&[("Bob", 30), ("Al", 30), ("Cy", 20)]),
            name_age_columns(),
        )
    }

    fn displayed_names(list: &mut BocList<Person>) -> Vec<String> {
        let indices: Vec<usize> = list.rows_to_display().indices().collect();
        indices
            .into_iter()
            .map(|i| list.items()[i].name.clone())
            .collect()
    }

    fn paged(count: usize, page_size: usize) -> BocList<Person> {
        let rows: Vec<(String, i64)> = (0..count).map(|i| (format!("p{i}"), i as i64)).collect();
        let rows: Vec<(&str, i64)> = rows.iter().map(|(n, a)| (n.as_str(), *a)).collect();
        BocList::new(people(&rows), name_age_columns())
            .with_options(ListOptions {
                page_size,
                ..ListOptions::default()
            })
            .unwrap()
    }

    // ── Sorting ──

    #[test]
    fn sorts_by_age_then_name() {
        let mut list = sample();
        list.toggle_sort(1).unwrap();
        list.toggle_sort(0).unwrap();
        assert_eq!(displayed_names(&mut list), ["Cy", "Al", "Bob"]);
    }

    #[test]
    fn unsorted_list_keeps_bound_order() {
        let mut list = sample();
        assert_eq!(displayed_names(&mut list), ["Bob", "Al", "Cy"]);
    }

    #[test]
    fn toggling_three_times_restores_order() {
        let mut list = sample();
        let original = list.sorting_order().clone();
        list.toggle_sort(0).unwrap();
        assert_eq!(
            list.sorting_order().direction_of(list.column(0).unwrap().id()),
            SortDirection::Ascending
        );
        list.toggle_sort(0).unwrap();
        assert_eq!(displayed_names(&mut list), ["Cy", "Bob", "Al"]);
        list.toggle_sort(0).unwrap();
        assert_eq!(list.sorting_order(), &original);
        assert_eq!(displayed_names(&mut list), ["Bob", "Al", "Cy"]);
    }

    #[test]
    fn single_sorting_keeps_one_entry() {
        let mut list = sample()
            .with_options(ListOptions {
                enable_multiple_sorting: false,
                ..ListOptions::default()
            })
            .unwrap();
        list.toggle_sort(1).unwrap();
        list.toggle_sort(0).unwrap();
        assert_eq!(list.sorting_order().len(), 1);
        assert_eq!(displayed_names(&mut list), ["Al", "Bob", "Cy"]);
    }

    #[test]
    fn disabling_multiple_sorting_truncates_order() {
        let mut list = sample();
        list.toggle_sort(1).unwrap();
        list.toggle_sort(0).unwrap();
        list.set_options(ListOptions {
            enable_multiple_sorting: false,
            ..ListOptions::default()
        })
        .unwrap();
        assert_eq!(list.sorting_order().len(), 1);
        assert_eq!(list.sorting_order().entries()[0].column().title(), "Age");
    }

    #[test]
    fn sorting_can_be_disabled() {
        let mut list = sample();
        list.toggle_sort(1).unwrap();
        list.set_options(ListOptions {
            enable_sorting: false,
            ..ListOptions::default()
        })
        .unwrap();
        assert_eq!(
            list.toggle_sort(0),
            Err(ListError::NotAllowed("sorting is disabled"))
        );
        assert_eq!(displayed_names(&mut list), ["Bob", "Al", "Cy"]);
    }

    #[test]
    fn rejects_bad_columns() {
        let mut list = sample();
        assert_eq!(
            list.toggle_sort(5),
            Err(ListError::ColumnIndexOutOfRange { index: 5, len: 2 })
        );
        let fixed = ColumnDefinition::simple("Tags", "Tags")
            .unwrap()
            .sortable(false)
            .into_column();
        list.set_view_columns(vec![Column::clone(&fixed)]);
        assert_eq!(
            list.toggle_sort(2),
            Err(ListError::ColumnNotSortable("Tags".into()))
        );
        let stranger = ColumnDefinition::simple("Other", "Name").unwrap().into_column();
        assert_eq!(
            list.set_sorting_order(vec![SortingOrderEntry::ascending(stranger)]),
            Err(ListError::UnknownColumn("Other".into()))
        );
    }

    #[test]
    fn set_sorting_order_normalizes_entries() {
        let mut list = sample();
        let name = Column::clone(list.column(0).unwrap());
        let age = Column::clone(list.column(1).unwrap());
        let changed = list
            .set_sorting_order(vec![
                SortingOrderEntry::new(Column::clone(&name), SortDirection::None),
                SortingOrderEntry::descending(Column::clone(&age)),
                SortingOrderEntry::ascending(Column::clone(&age)),
            ])
            .unwrap();
        assert!(changed);
        assert_eq!(list.sorting_order().len(), 1);
        assert_eq!(displayed_names(&mut list), ["Bob", "Al", "Cy"]);
        assert!(!list
            .set_sorting_order(vec![SortingOrderEntry::descending(age)])
            .unwrap());
    }

    #[test]
    fn notifications_wrap_the_mutation() {
        let mut list = sample();
        let log = Arc::new(Mutex::new(Vec::new()));
        let before = Arc::clone(&log);
        list.sorting_order_changing().subscribe(move |change| {
            before
                .lock()
                .unwrap()
                .push(format!("changing {}->{}", change.old.len(), change.new.len()));
        });
        let after = Arc::clone(&log);
        let id = list.sorting_order_changed().subscribe(move |change| {
            after
                .lock()
                .unwrap()
                .push(format!("changed {}->{}", change.old.len(), change.new.len()));
        });
        list.toggle_sort(0).unwrap();
        list.sorting_order_changed().unsubscribe(id);
        list.clear_sorting_order();
        assert!(!list.clear_sorting_order());
        assert_eq!(
            *log.lock().unwrap(),
            ["changing 0->1", "changed 0->1", "changing 1->0"]
        );
    }

    #[test]
    fn removing_a_view_column_drops_its_entry() {
        let mut list = sample();
        let tags = ColumnDefinition::simple("Tags", "Tags").unwrap().into_column();
        list.set_view_columns(vec![tags]);
        list.toggle_sort(2).unwrap();
        list.toggle_sort(1).unwrap();
        assert_eq!(list.sorting_order().len(), 2);
        list.set_view_columns(Vec::new());
        assert_eq!(list.sorting_order().len(), 1);
        assert_eq!(list.sorting_order().entries()[0].column().title(), "Age");
    }

    #[test]
    fn sorting_order_state_round_trip() {
        let mut list = sample();
        list.toggle_sort(1).unwrap();
        list.toggle_sort(1).unwrap();
        list.toggle_sort(0).unwrap();
        let json = serde_json::to_string(&list.sorting_order_state()).unwrap();

        let mut restored = sample();
        let state: SortingOrderState = serde_json::from_str(&json).unwrap();
        assert!(restored.restore_sorting_order(&state).unwrap());
        assert_eq!(displayed_names(&mut restored), ["Al", "Bob", "Cy"]);

        let stale = SortingOrderState {
            entries: vec![SortingOrderStateEntry {
                column_index: 7,
                direction: SortDirection::Ascending,
            }],
        };
        assert_eq!(
            restored.restore_sorting_order(&stale),
            Err(ListError::ColumnIndexOutOfRange { index: 7, len: 2 })
        );
    }

    #[test]
    fn dynamic_columns_over_mixed_classes() {
        let items: Vec<Box<dyn BusinessObject>> = vec![
            Box::new(Person::new("Zoe", 50)),
            Box::new(Robot {
                serial: "R2".into(),
                age: 5,
            }),
            Box::new(Person::new("Amy", 20)),
        ];
        let columns = vec![
            ColumnDefinition::simple("Name", "Name")
                .unwrap()
                .dynamic(true)
                .into_column(),
            ColumnDefinition::simple("Age", "Age")
                .unwrap()
                .dynamic(true)
                .into_column(),
        ];
        let mut list = BocList::new(items, columns);
        list.toggle_sort(1).unwrap();
        let order: Vec<usize> = list.rows_to_display().indices().collect();
        assert_eq!(order, [1, 2, 0]);
        list.toggle_sort(1).unwrap();
        let order: Vec<usize> = list.rows_to_display().indices().collect();
        assert_eq!(order, [0, 2, 1]);
    }

    // ── Paging ──

    #[test]
    fn pages_of_three_over_seven_rows() {
        let mut list = paged(7, 3);
        assert_eq!(list.page_count(), 3);
        let page: Vec<usize> = list.rows_to_display().indices().collect();
        assert_eq!(page, [0, 1, 2]);
        list.go_to_next_page();
        let page: Vec<usize> = list.rows_to_display().indices().collect();
        assert_eq!(page, [3, 4, 5]);
        assert_eq!(list.rows_to_display().start(), 3);
        list.go_to_next_page();
        let window = list.rows_to_display();
        assert_eq!(window.indices().collect::<Vec<_>>(), [6]);
        assert_eq!(window.total(), 7);

        list.go_to_next_page();
        assert_eq!(list.current_page(), 2);
        list.go_to_first_page();
        list.go_to_previous_page();
        assert_eq!(list.current_page(), 0);
    }

    #[test]
    fn removing_rows_clamps_the_page() {
        let mut list = paged(7, 3);
        list.go_to_last_page();
        assert_eq!(list.current_page(), 2);
        list.remove_row(6).unwrap();
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.rows_to_display().indices().collect::<Vec<_>>(), [3, 4, 5]);
        list.set_items(Vec::new());
        assert_eq!(list.current_page(), 0);
        assert!(list.rows_to_display().is_empty());
        assert_eq!(list.current_item_index(), None);
    }

    #[test]
    fn disabled_paging_shows_every_row() {
        let mut list = paged(7, 0);
        assert_eq!(list.rows_to_display().len(), 7);
        list.set_page_size(5).unwrap();
        assert_eq!(list.rows_to_display().len(), 5);
        list.go_to_page(1);
        assert_eq!(list.rows_to_display().len(), 2);
    }

    // ── Row editing ──

    #[test]
    fn saving_a_sort_key_moves_the_row() {
        let mut list = sample();
        list.toggle_sort(1).unwrap();
        list.toggle_sort(0).unwrap();
        // Cy, Al, Bob
        list.switch_row_into_edit_mode(2).unwrap();
        assert_eq!(list.current_row(), 0);
        list.set_edit_value(2, 1, Value::Int(99)).unwrap();
        assert_eq!(displayed_names(&mut list), ["Cy", "Al", "Bob"]);

        assert_eq!(list.end_row_edit_mode(true), Ok(EditOutcome::Saved));
        assert_eq!(list.items()[2].age, Some(99));
        assert_eq!(displayed_names(&mut list), ["Al", "Bob", "Cy"]);
        assert_eq!(list.current_row(), 2);
        assert_eq!(list.current_item_index(), Some(2));
        assert!(list.edit_mode().is_read_only());
    }

    #[test]
    fn cancel_discards_pending_values() {
        let mut list = sample();
        list.switch_row_into_edit_mode(0).unwrap();
        list.set_edit_value(0, 0, Value::from("Rob")).unwrap();
        assert_eq!(list.end_row_edit_mode(false), Ok(EditOutcome::Canceled));
        assert_eq!(list.items()[0].name, "Bob");
        assert_eq!(list.end_row_edit_mode(false), Ok(EditOutcome::NotEditing));
    }

    #[test]
    fn invalid_row_stays_in_edit_mode() {
        let mut list = sample();
        list.switch_row_into_edit_mode(1).unwrap();
        list.set_edit_value(1, 0, Value::from("")).unwrap();
        list.set_edit_value(1, 1, Value::Int(1)).unwrap();
        assert_eq!(
            list.end_row_edit_mode(true),
            Ok(EditOutcome::Invalid(vec![ValidationFailure::Required {
                property: "Name".into()
            }]))
        );
        assert_eq!(list.editing_row(), Some(1));
        assert_eq!(list.items()[1], Person::new("Al", 30));
    }

    #[test]
    fn switching_rows_saves_the_previous_one() {
        let mut list = sample();
        list.switch_row_into_edit_mode(0).unwrap();
        list.set_edit_value(0, 0, Value::from("Rob")).unwrap();
        list.switch_row_into_edit_mode(2).unwrap();
        assert_eq!(list.items()[0].name, "Rob");
        assert_eq!(list.editing_row(), Some(2));
    }

    #[test]
    fn never_two_rows_in_edit_mode() {
        let mut list = sample();
        list.switch_row_into_edit_mode(0).unwrap();
        list.set_edit_value(0, 0, Value::Null).unwrap();
        let err = list.switch_row_into_edit_mode(2).unwrap_err();
        assert!(matches!(err, ListError::ValidationFailed { row: 0, .. }));
        assert_eq!(list.editing_row(), Some(0));
        assert!(list.edit_mode().row(2).is_none());
    }

    #[test]
    fn host_validator_can_reject() {
        let mut list = sample();
        list.set_row_validator(|_, person, row| {
            let age = row
                .controls()
                .find_map(|(_, c)| c.value().as_int())
                .or(person.age);
            age.is_some_and(|a| a < 120)
        });
        list.switch_row_into_edit_mode(0).unwrap();
        list.set_edit_value(0, 1, Value::Int(200)).unwrap();
        assert_eq!(
            list.end_row_edit_mode(true),
            Ok(EditOutcome::Invalid(vec![ValidationFailure::Rejected]))
        );
        list.set_edit_value(0, 1, Value::Int(31)).unwrap();
        assert_eq!(list.end_row_edit_mode(true), Ok(EditOutcome::Saved));
        assert_eq!(list.items()[0].age, Some(31));
    }

    #[test]
    fn edit_value_errors() {
        let mut list = sample();
        assert_eq!(
            list.set_edit_value(0, 0, Value::from("x")),
            Err(ListError::NotAllowed("the row is not in edit mode"))
        );
        assert_eq!(
            list.switch_row_into_edit_mode(3),
            Err(ListError::RowIndexOutOfRange { index: 3, len: 3 })
        );
        let custom = ColumnDefinition::compound("Full", &["LastName", "Name"])
            .unwrap()
            .into_column();
        list.set_view_columns(vec![custom]);
        list.switch_row_into_edit_mode(0).unwrap();
        assert_eq!(
            list.set_edit_value(0, 2, Value::from("x")),
            Err(ListError::ColumnNotEditable("Full".into()))
        );
    }

    #[test]
    fn save_errors_keep_the_row_in_edit_mode() {
        let mut list = sample();
        list.switch_row_into_edit_mode(0).unwrap();
        list.set_edit_value(0, 1, Value::from("old")).unwrap();
        let err = list.end_row_edit_mode(true).unwrap_err();
        assert!(matches!(err, ListError::Property(_)));
        assert_eq!(list.editing_row(), Some(0));
    }

    #[test]
    fn failed_save_leaves_item_and_order_untouched() {
        let mut list = sample();
        list.toggle_sort(0).unwrap();
        let before: Vec<usize> = list.rows_to_display().indices().collect();
        assert_eq!(before, [1, 0, 2]);

        list.switch_row_into_edit_mode(1).unwrap();
        list.set_edit_value(1, 0, Value::from("Zed")).unwrap();
        list.set_edit_value(1, 1, Value::from("bad")).unwrap();
        let err = list.end_row_edit_mode(true).unwrap_err();
        assert!(matches!(err, ListError::Property(_)));

        assert_eq!(list.items()[1].name, "Al");
        assert_eq!(list.items()[1].age, Some(30));
        let after: Vec<usize> = list.rows_to_display().indices().collect();
        assert_eq!(after, [1, 0, 2]);
        assert_eq!(list.editing_row(), Some(1));
        let name = list.column(0).unwrap().id();
        let pending = list.edit_mode().row(1).unwrap().control(name).unwrap();
        assert_eq!(pending.value(), &Value::from("Zed"));

        // Fixing the bad value lets the same edit through.
        list.set_edit_value(1, 1, Value::Int(31)).unwrap();
        assert_eq!(list.end_row_edit_mode(true), Ok(EditOutcome::Saved));
        assert_eq!(displayed_names(&mut list), ["Bob", "Cy", "Zed"]);
    }

    #[test]
    fn failed_list_save_restores_earlier_rows() {
        let mut list = sample();
        list.toggle_sort(1).unwrap();
        list.switch_list_into_edit_mode().unwrap();
        list.set_edit_value(0, 1, Value::Int(1)).unwrap();
        list.set_edit_value(2, 1, Value::from("bad")).unwrap();
        assert!(matches!(
            list.end_list_edit_mode(true),
            Err(ListError::Property(_))
        ));
        assert_eq!(list.items()[0].age, Some(30));
        assert!(list.edit_mode().is_list_editing());
        assert_eq!(displayed_names(&mut list), ["Cy", "Bob", "Al"]);
    }

    #[test]
    fn mixed_kinds_sort_through_the_list() {
        struct Loose(Value);
        impl BusinessObject for Loose {
            fn class_name(&self) -> &str {
                "Loose"
            }
            fn property_handle(&self, _: &str) -> Option<boc_core::PropertyHandle> {
                Some(boc_core::PropertyHandle::new(0))
            }
            fn value(&self, _: boc_core::PropertyHandle) -> Result<Value, PropertyError> {
                Ok(self.0.clone())
            }
        }
        let items: Vec<Loose> = (0..2000i64)
            .map(|n| {
                if n % 2 == 0 {
                    Loose(Value::Int(n))
                } else {
                    Loose(Value::Text(n.to_string()))
                }
            })
            .collect();
        let column = ColumnDefinition::simple("V", "V").unwrap().into_column();
        let mut list = BocList::new(items, vec![column]);
        list.toggle_sort(0).unwrap();
        let mut order: Vec<usize> = list.rows_to_display().indices().collect();
        assert_eq!(order.len(), 2000);
        order.sort_unstable();
        assert_eq!(order, (0..2000).collect::<Vec<_>>());
        list.toggle_sort(0).unwrap();
        assert_eq!(list.rows_to_display().total(), 2000);
    }

    #[test]
    fn add_row_in_list_edit_mode_is_atomic() {
        let items: Vec<Box<dyn BusinessObject>> = vec![Box::new(Person::full("Ann", "Lee"))];
        let columns = vec![ColumnDefinition::simple("Last", "LastName")
            .unwrap()
            .dynamic(true)
            .into_column()];
        let mut list = BocList::new(items, columns);
        list.switch_list_into_edit_mode().unwrap();
        let err = list
            .add_row(Box::new(Robot {
                serial: "R2".into(),
                age: 5,
            }))
            .unwrap_err();
        assert!(matches!(
            err,
            ListError::Property(PropertyError::UnknownProperty { .. })
        ));
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.rows_to_display().total(), 1);
        assert!(list.edit_mode().row(1).is_none());
        assert_eq!(list.end_list_edit_mode(true), Ok(EditOutcome::Saved));
    }

    #[test]
    fn add_and_edit_row_needs_row_edit_mode() {
        let mut list = sample()
            .with_options(ListOptions {
                row_edit_mode_enabled: false,
                ..ListOptions::default()
            })
            .unwrap();
        assert_eq!(
            list.add_and_edit_row(Person::new("Dee", 1)),
            Err(ListError::NotAllowed("row edit mode is disabled"))
        );
        assert_eq!(list.items().len(), 3);
    }

    #[test]
    fn add_and_edit_row() {
        let mut list = sample();
        let index = list.add_and_edit_row(Person::new("Dee", 1)).unwrap();
        assert_eq!(index, 3);
        assert_eq!(list.editing_row(), Some(3));
        assert_eq!(list.rows_to_display().total(), 4);
    }

    #[test]
    fn removing_rows_reindexes_edits() {
        let mut list = sample();
        list.switch_row_into_edit_mode(2).unwrap();
        let removed = list.remove_row(0).unwrap();
        assert_eq!(removed.name, "Bob");
        assert_eq!(list.editing_row(), Some(1));
        list.remove_row(1).unwrap();
        assert!(list.edit_mode().is_read_only());
        assert!(list.remove_row(5).is_err());
    }

    #[test]
    fn replace_value_outside_edit_mode() {
        let mut list = sample();
        list.toggle_sort(0).unwrap();
        list.replace_value(1, 0, Value::from("Zed")).unwrap();
        assert_eq!(displayed_names(&mut list), ["Bob", "Cy", "Zed"]);
        list.switch_row_into_edit_mode(1).unwrap();
        assert_eq!(
            list.replace_value(1, 0, Value::from("Al")),
            Err(ListError::NotAllowed("the row is in edit mode"))
        );
    }

    // ── List editing ──

    #[test]
    fn list_edit_mode_rejected_while_paging() {
        let mut list = paged(4, 2);
        assert_eq!(
            list.switch_list_into_edit_mode(),
            Err(ListError::NotAllowed("list edit mode while paging is enabled"))
        );
        list.set_page_size(0).unwrap();
        list.switch_list_into_edit_mode().unwrap();
        assert!(list.set_page_size(2).is_err());
        assert!(list.switch_row_into_edit_mode(0).is_err());
    }

    #[test]
    fn list_edit_mode_requires_no_row_editing() {
        let mut list = sample();
        list.switch_row_into_edit_mode(0).unwrap();
        assert_eq!(
            list.switch_list_into_edit_mode(),
            Err(ListError::NotAllowed("a row is in edit mode"))
        );
    }

    #[test]
    fn list_save_is_all_or_nothing() {
        let mut list = sample();
        list.switch_list_into_edit_mode().unwrap();
        list.set_edit_value(0, 1, Value::Int(1)).unwrap();
        list.set_edit_value(2, 0, Value::from("")).unwrap();
        assert!(matches!(
            list.end_list_edit_mode(true),
            Ok(EditOutcome::Invalid(_))
        ));
        assert_eq!(list.items()[0].age, Some(30));

        list.set_edit_value(2, 0, Value::from("Cyd")).unwrap();
        let added = list.add_row(Person::new("Eve", 9)).unwrap();
        list.set_edit_value(added, 1, Value::Int(10)).unwrap();
        assert_eq!(list.end_list_edit_mode(true), Ok(EditOutcome::Saved));
        assert_eq!(list.items()[0].age, Some(1));
        assert_eq!(list.items()[2].name, "Cyd");
        assert_eq!(list.items()[3].age, Some(10));
    }

    // ── Component ──

    #[test]
    fn update_emits_follow_ups() {
        let mut h = TestHarness::new(paged(7, 3));
        h.send(Message::ToggleSort(1));
        h.send(Message::NextPage);
        h.send(Message::EditRow(0));
        h.send(Message::SaveRow);
        assert_eq!(
            h.emitted(),
            &[
                Message::SortingOrderChanged,
                Message::PageChanged(1),
                Message::PageChanged(0),
                Message::RowEditModeEnded {
                    index: 0,
                    saved: true
                },
            ]
        );
    }

    #[test]
    fn update_reports_failures() {
        let mut h = TestHarness::new(paged(4, 2));
        h.send(Message::EditList);
        h.send(Message::ToggleSort(9));
        assert_eq!(
            h.emitted(),
            &[
                Message::OperationFailed(ListError::NotAllowed(
                    "list edit mode while paging is enabled"
                )),
                Message::OperationFailed(ListError::ColumnIndexOutOfRange { index: 9, len: 2 }),
            ]
        );
        h.drain_messages();
        assert_eq!(h.emitted().len(), 2);
    }

    #[test]
    fn renders_window_with_sort_glyphs() {
        let mut list = paged(7, 3).with_title("People");
        list.toggle_sort(1).unwrap();
        list.toggle_sort(1).unwrap();
        let h = TestHarness::new(list);
        let screen = h.render_string(40, 8);
        assert!(screen.contains("People"));
        assert!(screen.contains("Age ▼"));
        assert!(screen.contains("p6"));
        assert!(!screen.contains("p3"));
        assert!(screen.contains("Page 1/3"));
    }

    #[test]
    fn renders_pending_values() {
        let mut list = sample();
        list.switch_row_into_edit_mode(0).unwrap();
        list.set_edit_value(0, 0, Value::from("Robert")).unwrap();
        let h = TestHarness::new(list);
        assert!(h.render_string(40, 6).contains("Robert"));
    }
}
