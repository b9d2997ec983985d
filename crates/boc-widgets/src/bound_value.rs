//! A single property binding with pending-edit tracking.
//!
//! `BoundValue` is the model behind every editable control: it loads a value
//! from a business object, holds the user's pending change, validates it and
//! writes it back on save.

use boc_core::{BusinessObject, PropertyError, PropertyPath, PropertyResolver, Value};

/// Why a pending value was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationFailure {
    /// A required value is empty.
    #[error("`{property}` requires a value")]
    Required { property: String },
    /// A custom column rejected the row.
    #[error("column `{column}` rejected the row")]
    Custom { column: String },
    /// The host's validation callback rejected the row.
    #[error("the row was rejected")]
    Rejected,
}

#[derive(Debug, Clone)]
pub struct BoundValue {
    path: PropertyPath,
    dynamic: bool,
    required: bool,
    read_only: bool,
    value: Value,
    /// The value as last loaded from the object.
    loaded: Value,
    dirty: bool,
}

impl BoundValue {
    pub fn new(path: PropertyPath) -> Self {
        Self {
            path,
            dynamic: false,
            required: false,
            read_only: false,
            value: Value::Null,
            loaded: Value::Null,
            dirty: false,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Load the value from `object`.
    ///
    /// With `interim` set, a pending change survives the reload.
    pub fn load_value(
        &mut self,
        object: &dyn BusinessObject,
        resolver: &mut PropertyResolver,
        interim: bool,
    ) -> Result<(), PropertyError> {
        if interim && self.dirty {
            return Ok(());
        }
        self.value = resolver.get(object, &self.path, self.dynamic)?;
        self.loaded = self.value.clone();
        self.dirty = false;
        Ok(())
    }

    /// Replace the pending value. Returns `true` if the value changed.
    /// Read-only bindings ignore the call.
    pub fn set_value(&mut self, value: Value) -> bool {
        if self.read_only || self.value == value {
            return false;
        }
        self.value = value;
        self.dirty = true;
        true
    }

    pub fn validate(&self) -> Result<(), ValidationFailure> {
        if self.required && self.value.is_empty() {
            return Err(ValidationFailure::Required {
                property: self.path.to_string(),
            });
        }
        Ok(())
    }

    /// Write a pending change back into `object`. Returns `true` if anything
    /// was written.
    pub fn save_value(
        &mut self,
        object: &mut dyn BusinessObject,
        resolver: &mut PropertyResolver,
    ) -> Result<bool, PropertyError> {
        if !self.dirty || self.read_only {
            return Ok(false);
        }
        resolver.set(object, &self.path, self.value.clone())?;
        self.dirty = false;
        Ok(true)
    }

    /// Undo a save: write the loaded value back into `object` and mark the
    /// pending value dirty again.
    pub fn revert_value(
        &mut self,
        object: &mut dyn BusinessObject,
        resolver: &mut PropertyResolver,
    ) -> Result<(), PropertyError> {
        resolver.set(object, &self.path, self.loaded.clone())?;
        self.dirty = true;
        Ok(())
    }
}
