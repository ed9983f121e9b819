//! Effective name construction and the registry-wide name index.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{trace, warn};

use super::policy::MatchingPolicy;
use super::types::{EffectiveName, EffectiveNames, NameConflict};
use crate::properties::{PropertyGroup, PropertyId, RegisteredProperty, Registry};

/// Build the canonical name from the group path and the identity.
///
/// Returns `None` when the name cannot be built: a blank identity, a path
/// with empty segments (`a..b`, leading or trailing dots), or whitespace in
/// either part.
pub fn canonical_name(group: &PropertyGroup, identity: &str) -> Option<String> {
    if identity.is_empty() || identity.chars().any(char::is_whitespace) {
        return None;
    }
    if group.is_root() {
        return Some(identity.to_string());
    }

    let path = group.path();
    let valid_path = path
        .split('.')
        .all(|segment| !segment.is_empty() && !segment.chars().any(char::is_whitespace));
    if !valid_path {
        return None;
    }
    Some(format!("{}.{}", path, identity))
}

/// Compute the effective names for one registered property.
///
/// The canonical name is first and is usable for both input and output.
/// Aliases follow in declaration order; an alias that normalizes to a name
/// the property already owns is folded into it.
pub fn effective_names(
    property: &RegisteredProperty,
    policy: &dyn MatchingPolicy,
) -> Option<EffectiveNames> {
    let canonical = canonical_name(&property.group, property.decl.identity())?;

    let mut names = vec![EffectiveName {
        normalized: policy.normalize(&canonical),
        actual: canonical,
        is_primary: true,
        input: true,
        output: true,
    }];

    for alias in property.decl.aliases() {
        let actual = alias.name.trim().to_string();
        let normalized = policy.normalize(&actual);
        if let Some(existing) = names.iter_mut().find(|n| n.normalized == normalized) {
            existing.input |= alias.usage.is_input();
            existing.output |= alias.usage.is_output();
            continue;
        }
        names.push(EffectiveName {
            actual,
            normalized,
            is_primary: false,
            input: alias.usage.is_input(),
            output: alias.usage.is_output(),
        });
    }

    Some(EffectiveNames {
        property: property.id.clone(),
        names,
    })
}

/// Registry-wide lookup from normalized input names to properties.
///
/// Conflicting names are reported and left out of the lookup, so no
/// candidate can ever be routed to the wrong property.
pub struct NameIndex {
    policy: Arc<dyn MatchingPolicy>,
    by_property: HashMap<PropertyId, EffectiveNames>,
    inputs: HashMap<String, (PropertyId, String)>,
    conflicts: Vec<NameConflict>,
    unnamed: Vec<PropertyId>,
}

impl NameIndex {
    pub fn build(registry: &Registry, policy: Arc<dyn MatchingPolicy>) -> Self {
        let mut by_property = HashMap::new();
        let mut claims: HashMap<String, Vec<(PropertyId, String, bool)>> = HashMap::new();
        let mut claim_order: Vec<String> = Vec::new();
        let mut unnamed = Vec::new();

        for property in registry.iter() {
            let Some(names) = effective_names(property, policy.as_ref()) else {
                warn!(
                    event = "core.naming.unnamed_property",
                    property = %property.id,
                    group = property.group.path(),
                    "Canonical name could not be built; property is excluded from loader matching"
                );
                unnamed.push(property.id.clone());
                continue;
            };

            for name in &names.names {
                let entry = claims.entry(name.normalized.clone()).or_insert_with(|| {
                    claim_order.push(name.normalized.clone());
                    Vec::new()
                });
                entry.push((property.id.clone(), name.actual.clone(), name.input));
            }
            by_property.insert(property.id.clone(), names);
        }

        let mut inputs = HashMap::new();
        let mut conflicts = Vec::new();
        for normalized in claim_order {
            let claimants = claims.remove(&normalized).unwrap_or_default();
            if claimants.len() > 1 {
                warn!(
                    event = "core.naming.conflict_detected",
                    name = %normalized,
                    claimants = claimants.len()
                );
                conflicts.push(NameConflict {
                    normalized,
                    claimants: claimants
                        .into_iter()
                        .map(|(property, actual, _)| (property, actual))
                        .collect(),
                });
            } else if let Some((property, actual, true)) = claimants.into_iter().next() {
                trace!(
                    event = "core.naming.input_name_indexed",
                    name = %actual,
                    property = %property
                );
                inputs.insert(normalized, (property, actual));
            }
        }

        Self {
            policy,
            by_property,
            inputs,
            conflicts,
            unnamed,
        }
    }

    pub fn policy(&self) -> &dyn MatchingPolicy {
        self.policy.as_ref()
    }

    /// Find the property a raw candidate name refers to.
    pub fn lookup(&self, raw_name: &str) -> Option<&PropertyId> {
        self.inputs
            .get(&self.policy.normalize(raw_name))
            .map(|(property, _)| property)
    }

    pub fn names_of(&self, property: &PropertyId) -> Option<&EffectiveNames> {
        self.by_property.get(property)
    }

    /// Literal input names, e.g. for loaders that look entries up one by one.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.values().map(|(_, actual)| actual.as_str())
    }

    pub fn conflicts(&self) -> &[NameConflict] {
        &self.conflicts
    }

    pub fn unnamed(&self) -> &[PropertyId] {
        &self.unnamed
    }
}
