//! Business objects shared by the widget tests.

use boc_core::{BusinessObject, PropertyError, PropertyHandle, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub tags: Vec<String>,
    pub active: Option<bool>,
}

impl Person {
    pub fn new(name: &str, age: i64) -> Self {
        Self {
            name: name.to_string(),
            last_name: String::new(),
            age: Some(age),
            tags: Vec::new(),
            active: None,
        }
    }

    pub fn full(first: &str, last: &str) -> Self {
        Self {
            last_name: last.to_string(),
            ..Self::new(first, 0)
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

impl BusinessObject for Person {
    fn class_name(&self) -> &str {
        "Person"
    }

    fn property_handle(&self, name: &str) -> Option<PropertyHandle> {
        let index = match name {
            "Name" => 0,
            "LastName" => 1,
            "Age" => 2,
            "Tags" => 3,
            "Active" => 4,
            "Broken" => 5,
            _ => return None,
        };
        Some(PropertyHandle::new(index))
    }

    fn value(&self, handle: PropertyHandle) -> Result<Value, PropertyError> {
        match handle.index() {
            0 => Ok(Value::from(self.name.as_str())),
            1 => Ok(Value::from(self.last_name.as_str())),
            2 => Ok(Value::from(self.age)),
            3 => Ok(Value::from(self.tags.clone())),
            4 => Ok(Value::from(self.active)),
            _ => Err(PropertyError::Failed(format!("{} cannot be read", self.name))),
        }
    }

    fn set_value(&mut self, handle: PropertyHandle, value: Value) -> Result<(), PropertyError> {
        let mismatch = |property: &str, expected, value: &Value| PropertyError::TypeMismatch {
            property: property.to_string(),
            expected,
            found: value.kind_name(),
        };
        match (handle.index(), value) {
            (0, Value::Text(s)) => self.name = s,
            (1, Value::Text(s)) => self.last_name = s,
            (2, Value::Int(i)) => self.age = Some(i),
            (2, Value::Null) => self.age = None,
            (4, Value::Bool(b)) => self.active = Some(b),
            (4, Value::Null) => self.active = None,
            (0, v) => return Err(mismatch("Name", "text", &v)),
            (1, v) => return Err(mismatch("LastName", "text", &v)),
            (2, v) => return Err(mismatch("Age", "int", &v)),
            (4, v) => return Err(mismatch("Active", "bool", &v)),
            (i, _) => {
                return Err(PropertyError::ReadOnly {
                    property: format!("Person#{i}"),
                })
            }
        }
        Ok(())
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

/// A second class with a different property layout, for dynamic bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    pub serial: String,
    pub age: i64,
}

impl BusinessObject for Robot {
    fn class_name(&self) -> &str {
        "Robot"
    }

    fn property_handle(&self, name: &str) -> Option<PropertyHandle> {
        match name {
            "Age" => Some(PropertyHandle::new(0)),
            "Name" => Some(PropertyHandle::new(1)),
            _ => None,
        }
    }

    fn value(&self, handle: PropertyHandle) -> Result<Value, PropertyError> {
        match handle.index() {
            0 => Ok(Value::Int(self.age)),
            1 => Ok(Value::from(self.serial.as_str())),
            _ => Err(PropertyError::Failed("unknown handle".into())),
        }
    }
}

pub fn people(rows: &[(&str, i64)]) -> Vec<Person> {
    rows.iter().map(|(n, a)| Person::new(n, *a)).collect()
}
