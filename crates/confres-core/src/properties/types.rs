//! Property declaration data structures.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::validators::Validator;
use crate::values::{Value, ValueType};

/// Where an alias may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasUsage {
    /// Accepted when matching loader candidates only.
    Input,
    /// Written in generated output (samples) only.
    Output,
    Both,
}

impl AliasUsage {
    pub fn is_input(&self) -> bool {
        matches!(self, AliasUsage::Input | AliasUsage::Both)
    }

    pub fn is_output(&self) -> bool {
        matches!(self, AliasUsage::Output | AliasUsage::Both)
    }
}

/// An additional, absolute name for a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub usage: AliasUsage,
}

impl Alias {
    pub fn new(name: impl Into<String>, usage: AliasUsage) -> Self {
        Self {
            name: name.into(),
            usage,
        }
    }
}

/// Named namespace that supplies the canonical-name prefix to its properties.
///
/// An empty path is the root group: its properties are named by identity alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyGroup {
    path: String,
    description: Option<String>,
}

impl PropertyGroup {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: None,
        }
    }

    pub fn root() -> Self {
        Self::new("")
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

/// Registry key for a property: its group path joined with its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(group: &PropertyGroup, identity: &str) -> Self {
        if group.is_root() {
            Self(identity.to_string())
        } else {
            Self(format!("{}.{}", group.path(), identity))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Typed handle for reading one property from a snapshot.
pub struct Property<T> {
    id: PropertyId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    pub fn new(id: PropertyId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> &PropertyId {
        &self.id
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.id).finish()
    }
}

/// Immutable declaration of one configurable value.
///
/// Built through [`PropertyDecl::builder`], which converts and validates the
/// default so every declared default already satisfies its own validators.
#[derive(Clone)]
pub struct PropertyDecl {
    pub(crate) identity: String,
    pub(crate) value_type: ValueType,
    pub(crate) default: Option<Value>,
    pub(crate) required: bool,
    pub(crate) aliases: Vec<Alias>,
    pub(crate) validators: Vec<Validator>,
    pub(crate) description: Option<String>,
    pub(crate) secret: bool,
}

impl PropertyDecl {
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Whether an empty candidate is a real value rather than "no value".
    pub fn permits_empty(&self) -> bool {
        self.validators.iter().any(Validator::permits_empty)
    }
}

impl fmt::Debug for PropertyDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default = if self.secret {
            self.default.as_ref().map(|_| "******".to_string())
        } else {
            self.default.as_ref().map(|v| v.to_string())
        };
        f.debug_struct("PropertyDecl")
            .field("identity", &self.identity)
            .field("value_type", &self.value_type)
            .field("default", &default)
            .field("required", &self.required)
            .field("aliases", &self.aliases)
            .field("validators", &self.validators)
            .finish()
    }
}
