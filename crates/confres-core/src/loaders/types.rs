//! Raw candidate data and the read-only context handed to loaders.

use std::collections::HashMap;

use crate::naming::NameIndex;
use crate::properties::{PropertyId, Registry};
use crate::values::Value;

/// The textual value of a raw candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    /// The name appeared with no value token (e.g. a bare `--verbose`).
    Bare,
}

impl RawValue {
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(text) => text.trim().is_empty(),
            RawValue::Bare => true,
        }
    }
}

/// Unvalidated (name, value, source) triple produced by a loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub name: String,
    pub value: RawValue,
    pub source: String,
}

impl RawCandidate {
    pub fn text(name: impl Into<String>, value: impl Into<String>, source: &str) -> Self {
        Self {
            name: name.into(),
            value: RawValue::Text(value.into()),
            source: source.to_string(),
        }
    }

    pub fn bare(name: impl Into<String>, source: &str) -> Self {
        Self {
            name: name.into(),
            value: RawValue::Bare,
            source: source.to_string(),
        }
    }
}

/// What a loader may see while loading: the known names, the declarations
/// and the values already resolved by higher-ranked loaders.
pub struct LoadContext<'a> {
    registry: &'a Registry,
    names: &'a NameIndex,
    resolved: &'a HashMap<PropertyId, Value>,
}

impl<'a> LoadContext<'a> {
    pub fn new(
        registry: &'a Registry,
        names: &'a NameIndex,
        resolved: &'a HashMap<PropertyId, Value>,
    ) -> Self {
        Self {
            registry,
            names,
            resolved,
        }
    }

    /// Whether `raw_name` refers to a known property.
    pub fn is_known(&self, raw_name: &str) -> bool {
        self.names.lookup(raw_name).is_some()
    }

    pub fn lookup(&self, raw_name: &str) -> Option<&PropertyId> {
        self.names.lookup(raw_name)
    }

    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.names.input_names()
    }

    /// Value stored so far for a property by an earlier loader.
    pub fn resolved_value(&self, property: &PropertyId) -> Option<&Value> {
        self.resolved.get(property)
    }

    /// The value a property holds at this point of the pass: an earlier
    /// loader's value, else its declared default.
    pub fn current_value(&self, property: &PropertyId) -> Option<&Value> {
        self.resolved_value(property).or_else(|| {
            self.registry
                .get(property)
                .and_then(|registered| registered.decl.default_value())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values() {
        assert!(RawValue::Text(String::new()).is_blank());
        assert!(RawValue::Text("  \t".to_string()).is_blank());
        assert!(RawValue::Bare.is_blank());
        assert!(!RawValue::Text(" x ".to_string()).is_blank());
    }

    #[test]
    fn test_current_value_falls_back_to_default() {
        use crate::naming::UppercasePolicy;
        use crate::properties::{PropertyDecl, PropertyGroup};
        use std::sync::Arc;

        let registry = Registry::from_pairs([
            (
                PropertyDecl::integer("TIMEOUT").default_value(50).build().unwrap(),
                PropertyGroup::root(),
            ),
            (PropertyDecl::string("NAME").build().unwrap(), PropertyGroup::root()),
        ])
        .unwrap();
        let index = NameIndex::build(&registry, Arc::new(UppercasePolicy));
        let timeout = PropertyId::from("TIMEOUT");
        let name = PropertyId::from("NAME");

        let empty = HashMap::new();
        let context = LoadContext::new(&registry, &index, &empty);
        assert_eq!(context.current_value(&timeout), Some(&Value::Integer(50)));
        assert_eq!(context.resolved_value(&timeout), None);
        assert_eq!(context.current_value(&name), None);

        let resolved = HashMap::from([(timeout.clone(), Value::Integer(70))]);
        let context = LoadContext::new(&registry, &index, &resolved);
        assert_eq!(context.current_value(&timeout), Some(&Value::Integer(70)));
    }

    #[test]
    fn test_candidate_constructors() {
        let text = RawCandidate::text("TIMEOUT", "60", "fixed");
        assert_eq!(text.value, RawValue::Text("60".to_string()));
        assert_eq!(text.source, "fixed");

        let bare = RawCandidate::bare("verbose", "command-line");
        assert_eq!(bare.value, RawValue::Bare);
    }
}
