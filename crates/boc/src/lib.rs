//! **boc** -- business object controls rendered with [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything needed to bind
//! controls to business objects from a single dependency:
//!
//! ```toml
//! [dependencies]
//! boc = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`boc_core`] are available at the crate root
//!   ([`BusinessObject`], [`Value`], [`PropertyPath`], [`Component`],
//!   [`Command`], [`Notifier`], etc.).
//! * The [`widgets`] module re-exports everything from [`boc_widgets`]
//!   (the list control, the boolean value control and the paginator).
//! * [`ratatui`] is re-exported so hosts can render without depending on it
//!   directly.
//!
//! # Quick start
//!
//! ```ignore
//! use boc::widgets::list::{BocList, ColumnDefinition};
//! use boc::{BusinessObject, PropertyError, PropertyHandle, Value};
//!
//! struct Person { name: String, age: i64 }
//!
//! impl BusinessObject for Person {
//!     fn class_name(&self) -> &str { "Person" }
//!     fn property_handle(&self, name: &str) -> Option<PropertyHandle> {
//!         match name {
//!             "Name" => Some(PropertyHandle::new(0)),
//!             "Age" => Some(PropertyHandle::new(1)),
//!             _ => None,
//!         }
//!     }
//!     fn value(&self, handle: PropertyHandle) -> Result<Value, PropertyError> {
//!         Ok(match handle.index() {
//!             0 => Value::from(self.name.as_str()),
//!             _ => Value::Int(self.age),
//!         })
//!     }
//! }
//!
//! let columns = vec![
//!     ColumnDefinition::simple("Name", "Name")?.into_column(),
//!     ColumnDefinition::simple("Age", "Age")?.into_column(),
//! ];
//! let mut list = BocList::new(people, columns);
//! list.toggle_sort(1)?;
//! let visible: Vec<usize> = list.rows_to_display().indices().collect();
//! ```

pub use boc_core::*;
pub mod widgets {
    pub use boc_widgets::*;
}

pub use ratatui;
