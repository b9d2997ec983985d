//! The data-binding contract between controls and domain entities.
//!
//! Controls never know the concrete type of the objects they display. They
//! talk to them through [`BusinessObject`], which exposes named properties as
//! dynamically typed [`Value`]s. Property names are resolved into
//! [`PropertyHandle`]s once per runtime class (see
//! [`PropertyResolver`](crate::property::PropertyResolver)); reads and writes
//! then go through the handle.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Errors raised while reading or writing a bound property.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    /// The runtime class has no property with this name.
    #[error("class `{class}` has no property `{property}`")]
    UnknownProperty { class: String, property: String },
    /// A property path string could not be parsed.
    #[error("invalid property path `{0}`")]
    InvalidPath(String),
    /// An intermediate path segment did not yield a nested object.
    #[error("property `{segment}` does not hold a business object")]
    NotAnObject { segment: String },
    /// The value supplied for a write has the wrong kind.
    #[error("property `{property}` expects {expected}, got {found}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },
    /// The property cannot be written.
    #[error("property `{property}` is read-only")]
    ReadOnly { property: String },
    /// The object's own accessor failed.
    #[error("{0}")]
    Failed(String),
}

/// An opaque, class-specific property slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyHandle(usize);

impl PropertyHandle {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

/// A domain entity whose properties can be bound to controls.
///
/// # Example
///
/// ```rust,ignore
/// struct Person { name: String, age: i64 }
///
/// impl BusinessObject for Person {
///     fn class_name(&self) -> &str { "Person" }
///
///     fn property_handle(&self, name: &str) -> Option<PropertyHandle> {
///         match name {
///             "Name" => Some(PropertyHandle::new(0)),
///             "Age" => Some(PropertyHandle::new(1)),
///             _ => None,
///         }
///     }
///
///     fn value(&self, handle: PropertyHandle) -> Result<Value, PropertyError> {
///         match handle.index() {
///             0 => Ok(Value::from(self.name.as_str())),
///             1 => Ok(Value::Int(self.age)),
///             _ => Err(PropertyError::Failed("bad handle".into())),
///         }
///     }
/// }
/// ```
pub trait BusinessObject: Send + Sync {
    /// Name of the runtime class. Objects sharing a class name must resolve
    /// property names to the same handles.
    fn class_name(&self) -> &str;

    /// Resolve a property name. Called at most once per class and name by a
    /// [`PropertyResolver`](crate::property::PropertyResolver).
    fn property_handle(&self, name: &str) -> Option<PropertyHandle>;

    /// Read a property.
    fn value(&self, handle: PropertyHandle) -> Result<Value, PropertyError>;

    /// Write a property. Objects are read-only unless they override this.
    fn set_value(&mut self, handle: PropertyHandle, value: Value) -> Result<(), PropertyError> {
        let _ = value;
        Err(PropertyError::ReadOnly {
            property: format!("{}#{}", self.class_name(), handle.index()),
        })
    }

    /// Mutable access to a nested object, used when writing through a
    /// multi-segment path.
    fn child_mut(&mut self, handle: PropertyHandle) -> Option<&mut dyn BusinessObject> {
        let _ = handle;
        None
    }

    /// Text shown when the object itself is displayed as a value.
    fn display_name(&self) -> String {
        self.class_name().to_string()
    }
}

impl<B: BusinessObject + ?Sized> BusinessObject for Box<B> {
    fn class_name(&self) -> &str {
        (**self).class_name()
    }

    fn property_handle(&self, name: &str) -> Option<PropertyHandle> {
        (**self).property_handle(name)
    }

    fn value(&self, handle: PropertyHandle) -> Result<Value, PropertyError> {
        (**self).value(handle)
    }

    fn set_value(&mut self, handle: PropertyHandle, value: Value) -> Result<(), PropertyError> {
        (**self).set_value(handle, value)
    }

    fn child_mut(&mut self, handle: PropertyHandle) -> Option<&mut dyn BusinessObject> {
        (**self).child_mut(handle)
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}

/// A dynamically typed property value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Object(Arc<dyn BusinessObject>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `Null`, empty text and empty lists count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn BusinessObject>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Natural ordering between two values of comparable kinds.
    ///
    /// Returns `None` when the kinds cannot be compared (including NaN).
    pub fn natural_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Sort comparison used by list controls.
    ///
    /// Lists are replaced by their first element (an empty list acts as
    /// `Null`). `Null` sorts before everything else. Values without a natural
    /// ordering tie.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        let a = self.sort_operand();
        let b = other.sort_operand();
        match (a.is_null(), b.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => a.natural_cmp(b).unwrap_or(Ordering::Equal),
        }
    }

    fn sort_operand(&self) -> &Value {
        const NULL: &Value = &Value::Null;
        match self {
            Value::List(items) => items.first().unwrap_or(NULL),
            other => other,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(o) => f.debug_tuple("Object").field(&o.class_name()).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(o) => f.write_str(&o.display_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}
