//! Registry of declared properties and their owning groups.
//!
//! The registry is the engine's only intake: an already-enumerated list of
//! (declaration, group) pairs. Discovery of those pairs happens elsewhere.

use std::collections::HashMap;

use tracing::debug;

use super::errors::DeclarationError;
use super::types::{Property, PropertyDecl, PropertyGroup, PropertyId};

/// One registered declaration together with its group.
#[derive(Debug, Clone)]
pub struct RegisteredProperty {
    pub id: PropertyId,
    pub group: PropertyGroup,
    pub decl: PropertyDecl,
}

/// Ordered collection of registered properties.
///
/// Registration order is preserved; it drives the order of problems and of
/// the generated properties-file sample.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<RegisteredProperty>,
    index: HashMap<PropertyId, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from (declaration, group) pairs.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (PropertyDecl, PropertyGroup)>,
    ) -> Result<Self, DeclarationError> {
        let mut registry = Self::new();
        for (decl, group) in pairs {
            registry.register(&group, decl)?;
        }
        Ok(registry)
    }

    /// Register one declaration under `group`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::DuplicateProperty`] if the same group and
    /// identity were already registered. Names that differ only by letter case
    /// are accepted here and reported as naming conflicts during resolution.
    pub fn register(
        &mut self,
        group: &PropertyGroup,
        decl: PropertyDecl,
    ) -> Result<PropertyId, DeclarationError> {
        let id = PropertyId::new(group, decl.identity());
        if self.index.contains_key(&id) {
            return Err(DeclarationError::DuplicateProperty {
                property: id.to_string(),
            });
        }

        debug!(
            event = "core.registry.property_registered",
            property = %id,
            value_type = decl.value_type().name(),
            required = decl.is_required()
        );

        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(RegisteredProperty {
            id: id.clone(),
            group: group.clone(),
            decl,
        });
        Ok(id)
    }

    /// Register a declaration and return a typed handle for reading it.
    pub fn register_typed<T>(
        &mut self,
        group: &PropertyGroup,
        decl: PropertyDecl,
    ) -> Result<Property<T>, DeclarationError> {
        self.register(group, decl).map(Property::new)
    }

    pub fn get(&self, id: &PropertyId) -> Option<&RegisteredProperty> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredProperty> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
