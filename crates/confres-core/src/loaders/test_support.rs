//! Shared fixtures for loader unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::loaders::types::LoadContext;
use crate::naming::{NameIndex, UppercasePolicy};
use crate::properties::{PropertyDecl, PropertyGroup, PropertyId, Registry};
use crate::values::Value;

fn registry_of(identities: &[&str]) -> Registry {
    Registry::from_pairs(identities.iter().map(|identity| {
        (
            PropertyDecl::string(*identity).build().unwrap(),
            PropertyGroup::root(),
        )
    }))
    .unwrap()
}

/// Run `f` with a context knowing root-level string properties `identities`.
pub(crate) fn with_context<R>(identities: &[&str], f: impl FnOnce(&LoadContext<'_>) -> R) -> R {
    with_resolved_context(identities, &[], f)
}

/// Like [`with_context`], with values already resolved by earlier loaders.
pub(crate) fn with_resolved_context<R>(
    identities: &[&str],
    resolved: &[(&str, Value)],
    f: impl FnOnce(&LoadContext<'_>) -> R,
) -> R {
    let registry = registry_of(identities);
    let index = NameIndex::build(&registry, Arc::new(UppercasePolicy));
    let resolved: HashMap<PropertyId, Value> = resolved
        .iter()
        .map(|(id, value)| (PropertyId::from(*id), value.clone()))
        .collect();
    let context = LoadContext::new(&registry, &index, &resolved);
    f(&context)
}
