//! Effective name data structures.

use serde::Serialize;

use crate::properties::PropertyId;

/// A match-ready name: the literal form plus its normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveName {
    pub actual: String,
    pub normalized: String,
    pub is_primary: bool,
    pub input: bool,
    pub output: bool,
}

/// All effective names of one property. The canonical name comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveNames {
    pub property: PropertyId,
    pub names: Vec<EffectiveName>,
}

impl EffectiveNames {
    pub fn canonical(&self) -> &EffectiveName {
        // The constructor in naming::operations always pushes the canonical name first
        &self.names[0]
    }

    pub fn input_names(&self) -> impl Iterator<Item = &EffectiveName> {
        self.names.iter().filter(|n| n.input)
    }

    pub fn output_names(&self) -> impl Iterator<Item = &EffectiveName> {
        self.names.iter().filter(|n| n.output)
    }
}

/// Two or more properties that normalize to the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    pub normalized: String,
    /// (property, literal name) pairs in registration order.
    pub claimants: Vec<(PropertyId, String)>,
}

impl NameConflict {
    pub fn describe(&self) -> String {
        let claimants: Vec<String> = self
            .claimants
            .iter()
            .map(|(property, actual)| format!("'{}' (as '{}')", property, actual))
            .collect();
        format!(
            "name '{}' is claimed by {}",
            self.normalized,
            claimants.join(" and ")
        )
    }
}
