//! Process-wide resolution context.
//!
//! Install one context at startup; reads anywhere in the process then resolve
//! lazily on first use and share the same snapshot afterwards.

use std::sync::{Arc, OnceLock};

use tracing::info;

use super::context::{ResolutionContext, ResolutionPhase};
use super::errors::AccessError;
use super::snapshot::ValueSnapshot;
use crate::properties::Property;
use crate::values::FromValue;

static GLOBAL: OnceLock<ResolutionContext> = OnceLock::new();

/// Install the process-wide context. Only the first call succeeds.
pub fn install(context: ResolutionContext) -> Result<(), AccessError> {
    let properties = context.registry().len();
    GLOBAL
        .set(context)
        .map_err(|_| AccessError::AlreadyInstalled)?;
    info!(event = "core.resolution.context_installed", properties = properties);
    Ok(())
}

pub fn context() -> Result<&'static ResolutionContext, AccessError> {
    GLOBAL.get().ok_or(AccessError::NotInstalled)
}

pub fn is_installed() -> bool {
    GLOBAL.get().is_some()
}

pub fn phase() -> Option<ResolutionPhase> {
    GLOBAL.get().map(ResolutionContext::phase)
}

pub fn snapshot() -> Result<Arc<ValueSnapshot>, AccessError> {
    Ok(context()?.resolve()?)
}

/// Typed read from the process-wide context, resolving on first use.
pub fn get<T: FromValue>(property: &Property<T>) -> Result<Option<T>, AccessError> {
    context()?.get(property)
}

pub fn require<T: FromValue>(property: &Property<T>) -> Result<T, AccessError> {
    context()?.require(property)
}

/// Discard the process-wide outcome. No-op when nothing is installed.
pub fn reset_for_tests() {
    if let Some(context) = GLOBAL.get() {
        context.reset_for_tests();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::FixedValueLoader;
    use crate::properties::{PropertyDecl, PropertyGroup, Registry};

    // The global is shared by every test in this binary, so one test covers
    // the whole lifecycle.
    #[test]
    fn test_global_lifecycle() {
        let property: Property<i64> = {
            let mut registry = Registry::new();
            let handle = registry
                .register_typed::<i64>(
                    &PropertyGroup::root(),
                    PropertyDecl::integer("WORKERS").default_value(4).build().unwrap(),
                )
                .unwrap();
            let loader = FixedValueLoader::new([("workers", "8")]);
            assert!(matches!(get(&handle), Err(AccessError::NotInstalled)));
            install(ResolutionContext::new(registry, vec![Box::new(loader)])).unwrap();
            handle
        };

        assert_eq!(phase(), Some(ResolutionPhase::Unresolved));
        assert_eq!(require(&property).unwrap(), 8);
        assert_eq!(phase(), Some(ResolutionPhase::Resolved));

        reset_for_tests();
        assert_eq!(phase(), Some(ResolutionPhase::Unresolved));
        assert_eq!(snapshot().unwrap().len(), 1);

        let again = install(ResolutionContext::new(Registry::new(), Vec::new()));
        assert!(matches!(again, Err(AccessError::AlreadyInstalled)));
        assert!(is_installed());
    }
}
