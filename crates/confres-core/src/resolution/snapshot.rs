//! The immutable Value Snapshot published by a successful resolution.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeStruct};

use super::errors::AccessError;
use crate::properties::{Property, PropertyId};
use crate::values::parsing::format_duration;
use crate::values::{FromValue, Value};

const REDACTED: &str = "******";

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "source", rename_all = "kebab-case")]
pub enum ValueOrigin {
    /// The declared default applied.
    Default,
    /// Supplied by the loader with this label.
    Loader(String),
    /// No value and none required.
    Unset,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueOrigin::Default => f.write_str("default"),
            ValueOrigin::Loader(label) => f.write_str(label),
            ValueOrigin::Unset => f.write_str("unset"),
        }
    }
}

/// One snapshot entry.
#[derive(Clone, PartialEq)]
pub struct ResolvedValue {
    pub value: Option<Value>,
    pub origin: ValueOrigin,
    pub secret: bool,
}

impl ResolvedValue {
    /// Text for display: redacted for secrets, empty when unset.
    pub fn display_value(&self) -> String {
        match &self.value {
            None => String::new(),
            Some(_) if self.secret => REDACTED.to_string(),
            Some(Value::Duration(d)) => format_duration(*d),
            Some(value) => value.to_string(),
        }
    }

    fn json_value(&self) -> serde_json::Value {
        let Some(value) = &self.value else {
            return serde_json::Value::Null;
        };
        if self.secret {
            return serde_json::Value::from(REDACTED);
        }
        match value {
            Value::Text(s) => serde_json::Value::from(s.as_str()),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Flag(b) => serde_json::Value::from(*b),
            Value::Float(x) => serde_json::Value::from(*x),
            Value::Duration(d) => serde_json::Value::from(format_duration(*d)),
            Value::Path(p) => serde_json::Value::from(p.to_string_lossy().into_owned()),
        }
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: &dyn fmt::Debug = match &self.value {
            Some(_) if self.secret => &REDACTED,
            other => other,
        };
        f.debug_struct("ResolvedValue")
            .field("value", value)
            .field("origin", &self.origin)
            .finish()
    }
}

impl Serialize for ResolvedValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolvedValue", 3)?;
        state.serialize_field("value", &self.json_value())?;
        state.serialize_field("origin", &self.origin)?;
        state.serialize_field("secret", &self.secret)?;
        state.end()
    }
}

/// Final mapping from property to typed value.
///
/// Every registered property has an entry. Entries are kept in registration
/// order for display. The snapshot is never mutated once built.
#[derive(Debug, Clone, Default)]
pub struct ValueSnapshot {
    order: Vec<PropertyId>,
    entries: HashMap<PropertyId, ResolvedValue>,
}

impl ValueSnapshot {
    pub(crate) fn from_entries(entries: Vec<(PropertyId, ResolvedValue)>) -> Self {
        let order = entries.iter().map(|(id, _)| id.clone()).collect();
        Self {
            order,
            entries: entries.into_iter().collect(),
        }
    }

    /// Typed read through a property handle.
    pub fn get<T: FromValue>(&self, property: &Property<T>) -> Result<Option<T>, AccessError> {
        self.value(property.id())
    }

    /// Typed read that treats an unset property as an error.
    pub fn require<T: FromValue>(&self, property: &Property<T>) -> Result<T, AccessError> {
        self.get(property)?.ok_or_else(|| AccessError::Unset {
            property: property.id().clone(),
        })
    }

    /// Typed read by id.
    pub fn value<T: FromValue>(&self, id: &PropertyId) -> Result<Option<T>, AccessError> {
        let entry = self.entry(id).ok_or_else(|| AccessError::UnknownProperty {
            property: id.clone(),
        })?;
        match &entry.value {
            None => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .ok_or_else(|| AccessError::TypeMismatch {
                    property: id.clone(),
                    expected: T::EXPECTED,
                    actual: value.type_name(),
                }),
        }
    }

    pub fn raw(&self, id: &PropertyId) -> Option<&Value> {
        self.entries.get(id).and_then(|entry| entry.value.as_ref())
    }

    pub fn entry(&self, id: &PropertyId) -> Option<&ResolvedValue> {
        self.entries.get(id)
    }

    pub fn origin(&self, id: &PropertyId) -> Option<&ValueOrigin> {
        self.entries.get(id).map(|entry| &entry.origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyId, &ResolvedValue)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| (id, entry)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for ValueSnapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, entry) in self.iter() {
            map.serialize_entry(id, entry)?;
        }
        map.end()
    }
}
