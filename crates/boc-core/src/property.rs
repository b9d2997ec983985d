//! Property paths and their resolution against business objects.

use crate::business_object::{BusinessObject, PropertyError, PropertyHandle, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A dot-separated chain of property names, e.g. `Address.City`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Parse a path. Empty paths and empty segments are rejected.
    pub fn parse(path: &str) -> Result<Self, PropertyError> {
        let segments: Vec<String> = path.split('.').map(|s| s.trim().to_string()).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PropertyError::InvalidPath(path.to_string()));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, i.e. the property that is actually read or written.
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

impl FromStr for PropertyPath {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Resolves property names into handles and caches the result.
///
/// Dynamic lookups cache one handle per `(runtime class, property name)`.
/// Static lookups resolve a whole path once, against the first object they
/// see, and reuse those handles for every later object.
#[derive(Debug, Default)]
pub struct PropertyResolver {
    by_class: HashMap<(String, String), PropertyHandle>,
    by_path: HashMap<PropertyPath, Vec<PropertyHandle>>,
    lookups: usize,
}

impl PropertyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times an object was asked to resolve a property name.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Forget all cached resolutions.
    pub fn clear(&mut self) {
        self.by_class.clear();
        self.by_path.clear();
    }

    /// Read the value at `path`. A `Null` in the middle of the path yields
    /// `Null`.
    pub fn get(
        &mut self,
        object: &dyn BusinessObject,
        path: &PropertyPath,
        dynamic: bool,
    ) -> Result<Value, PropertyError> {
        let cached = if dynamic {
            None
        } else {
            self.by_path.get(path).cloned()
        };
        if let Some(handles) = cached {
            return walk_with_handles(object, path, &handles);
        }

        let segments = path.segments();
        let mut handles = Vec::with_capacity(segments.len());
        let Some((first, rest)) = segments.split_first() else {
            return Err(PropertyError::InvalidPath(path.to_string()));
        };
        let handle = self.class_handle(object, first)?;
        handles.push(handle);
        let mut value = object.value(handle)?;
        let mut previous = first;
        let mut complete = true;
        for segment in rest {
            let child = match value {
                Value::Object(child) => child,
                Value::Null => {
                    complete = false;
                    value = Value::Null;
                    break;
                }
                _ => {
                    return Err(PropertyError::NotAnObject {
                        segment: previous.clone(),
                    })
                }
            };
            let handle = self.class_handle(child.as_ref(), segment)?;
            handles.push(handle);
            value = child.value(handle)?;
            previous = segment;
        }
        if !dynamic && complete {
            self.by_path.insert(path.clone(), handles);
        }
        Ok(value)
    }

    /// Write `value` at `path`, walking nested objects through
    /// [`BusinessObject::child_mut`].
    pub fn set(
        &mut self,
        object: &mut dyn BusinessObject,
        path: &PropertyPath,
        value: Value,
    ) -> Result<(), PropertyError> {
        self.set_on(object, path.segments(), value)
    }

    fn set_on(
        &mut self,
        target: &mut dyn BusinessObject,
        segments: &[String],
        value: Value,
    ) -> Result<(), PropertyError> {
        match segments {
            [] => Err(PropertyError::InvalidPath(String::new())),
            [leaf] => {
                let handle = self.class_handle(&*target, leaf)?;
                target.set_value(handle, value)
            }
            [head, rest @ ..] => {
                let handle = self.class_handle(&*target, head)?;
                let child = target
                    .child_mut(handle)
                    .ok_or_else(|| PropertyError::NotAnObject {
                        segment: head.clone(),
                    })?;
                self.set_on(child, rest, value)
            }
        }
    }

    fn class_handle(
        &mut self,
        object: &dyn BusinessObject,
        name: &str,
    ) -> Result<PropertyHandle, PropertyError> {
        let key = (object.class_name().to_string(), name.to_string());
        if let Some(handle) = self.by_class.get(&key) {
            return Ok(*handle);
        }
        self.lookups += 1;
        let handle = object
            .property_handle(name)
            .ok_or_else(|| PropertyError::UnknownProperty {
                class: key.0.clone(),
                property: key.1.clone(),
            })?;
        log::trace!("resolved {}.{} to {:?}", key.0, key.1, handle);
        self.by_class.insert(key, handle);
        Ok(handle)
    }
}

fn walk_with_handles(
    object: &dyn BusinessObject,
    path: &PropertyPath,
    handles: &[PropertyHandle],
) -> Result<Value, PropertyError> {
    let Some((first, rest)) = handles.split_first() else {
        return Err(PropertyError::InvalidPath(path.to_string()));
    };
    let mut value = object.value(*first)?;
    for (handle, segment) in rest.iter().zip(path.segments()) {
        let child = match value {
            Value::Object(child) => child,
            Value::Null => return Ok(Value::Null),
            _ => {
                return Err(PropertyError::NotAnObject {
                    segment: segment.clone(),
                })
            }
        };
        value = child.value(*handle)?;
    }
    Ok(value)
}
