//! Business object controls for **boc**.
//!
//! Every control in this crate implements [`boc_core::Component`] and binds
//! to [`boc_core::BusinessObject`] properties through
//! [`boc_core::PropertyPath`]s.
//!
//! # Controls
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`list`] | Multi-key sortable, pageable list with row and list edit modes |
//! | [`boolean_value`] | Tri-state checkbox bound to a boolean property |
//! | [`paginator`] | Current-row based paging window and page indicator |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bound_value`] | One property binding with pending-edit tracking and validation |

pub mod boolean_value;
pub mod bound_value;
pub mod list;
pub mod paginator;

pub use boolean_value::BooleanValue;
pub use bound_value::{BoundValue, ValidationFailure};
pub use list::{BocList, ListError, ListOptions};
pub use paginator::Paginator;
