//! Core contracts for **boc** business object controls.
//!
//! `boc-core` provides the traits and types every control builds on. A control
//! is a [`Component`]: the host decodes a user gesture into a message, the
//! control's `update` mutates state and returns a [`Command`] of follow-up
//! messages, and `view` draws the result.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | A control driven by messages that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Follow-up messages returned from `update` |
//! | [`Notifier`] | Per-instance callback registration for before/after events |
//! | [`BusinessObject`] | The domain entity a control binds to |
//! | [`Value`] | A dynamically typed property value |
//! | [`PropertyPath`] / [`PropertyResolver`] | Property access with cached resolution |
//! | [`TestHarness`](testing::TestHarness) | Headless harness for unit-testing a [`Component`] |
//!
//! # Request cycle
//!
//! 1. **bind** -- the host hands the control its business objects.
//! 2. **event** -- the host maps a gesture (header click, pager button, ...)
//!    onto the control's `Message` type.
//! 3. **update** -- the control mutates state, raises its notifications and
//!    returns a [`Command`].
//! 4. **view** -- the control renders its current state.

pub mod business_object;
pub mod command;
pub mod component;
pub mod notify;
pub mod property;
pub mod testing;

pub use business_object::{BusinessObject, PropertyError, PropertyHandle, Value};
pub use command::Command;
pub use component::Component;
pub use notify::{HandlerId, Notifier};
pub use property::{PropertyPath, PropertyResolver};
