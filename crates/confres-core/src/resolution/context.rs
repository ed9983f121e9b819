//! Resolution context: the state machine around one resolution pass.
//!
//! `Unresolved -> Resolving -> Resolved | Failed`. The first caller to need a
//! value runs the pipeline; concurrent callers block on the same guard and
//! then observe the published result.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info};

use super::engine;
use super::errors::{AccessError, ResolutionError};
use super::snapshot::ValueSnapshot;
use crate::loaders::Loader;
use crate::naming::{MatchingPolicy, UppercasePolicy};
use crate::properties::{Property, Registry};
use crate::values::FromValue;

/// Settings for one resolution call.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub policy: Arc<dyn MatchingPolicy>,
    /// Log blank candidates at debug level.
    pub log_blank_candidates: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            policy: Arc::new(UppercasePolicy),
            log_blank_candidates: false,
        }
    }
}

impl ResolverOptions {
    pub fn with_policy(mut self, policy: Arc<dyn MatchingPolicy>) -> Self {
        self.policy = policy;
        self
    }
}

/// Externally visible state of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionPhase {
    Unresolved,
    Resolving,
    Resolved,
    Failed,
}

enum ResolutionState {
    Unresolved,
    Resolving,
    Resolved(Arc<ValueSnapshot>),
    Failed(ResolutionError),
}

/// Holds a registry, its ranked loaders and the outcome of resolving them.
pub struct ResolutionContext {
    registry: Registry,
    loaders: Vec<Box<dyn Loader>>,
    options: ResolverOptions,
    state: RwLock<ResolutionState>,
    guard: Mutex<()>,
}

impl ResolutionContext {
    /// Create a context. `loaders` are in rank order, highest precedence first.
    pub fn new(registry: Registry, loaders: Vec<Box<dyn Loader>>) -> Self {
        Self {
            registry,
            loaders,
            options: ResolverOptions::default(),
            state: RwLock::new(ResolutionState::Unresolved),
            guard: Mutex::new(()),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn phase(&self) -> ResolutionPhase {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            ResolutionState::Unresolved => ResolutionPhase::Unresolved,
            ResolutionState::Resolving => ResolutionPhase::Resolving,
            ResolutionState::Resolved(_) => ResolutionPhase::Resolved,
            ResolutionState::Failed(_) => ResolutionPhase::Failed,
        }
    }

    /// Resolve once and return the published snapshot.
    ///
    /// Later calls return the same snapshot, or the same error, without
    /// running the loaders again.
    pub fn resolve(&self) -> Result<Arc<ValueSnapshot>, ResolutionError> {
        if let Some(outcome) = self.published() {
            return outcome;
        }

        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(outcome) = self.published() {
            debug!(event = "core.resolution.waited_for_pass");
            return outcome;
        }

        self.set_state(ResolutionState::Resolving);
        let outcome = engine::resolve(&self.registry, &self.loaders, &self.options).map(Arc::new);
        match &outcome {
            Ok(snapshot) => self.set_state(ResolutionState::Resolved(snapshot.clone())),
            Err(error) => self.set_state(ResolutionState::Failed(error.clone())),
        }
        outcome
    }

    /// Typed read, resolving first if needed.
    pub fn get<T: FromValue>(&self, property: &Property<T>) -> Result<Option<T>, AccessError> {
        self.resolve()?.get(property)
    }

    /// Typed read of a value that must be present.
    pub fn require<T: FromValue>(&self, property: &Property<T>) -> Result<T, AccessError> {
        self.resolve()?.require(property)
    }

    /// Discard the outcome so the next read runs the pipeline again.
    ///
    /// Waits for an in-flight pass to finish first.
    pub fn reset_for_tests(&self) {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        self.set_state(ResolutionState::Unresolved);
        info!(event = "core.resolution.reset");
    }

    fn published(&self) -> Option<Result<Arc<ValueSnapshot>, ResolutionError>> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            ResolutionState::Resolved(snapshot) => Some(Ok(snapshot.clone())),
            ResolutionState::Failed(error) => Some(Err(error.clone())),
            ResolutionState::Unresolved | ResolutionState::Resolving => None,
        }
    }

    fn set_state(&self, state: ResolutionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

impl std::fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("properties", &self.registry.len())
            .field("loaders", &self.loaders.len())
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::{FixedValueLoader, LoadContext, LoaderError, RawCandidate};
    use crate::problems::ProblemKind;
    use crate::properties::{PropertyDecl, PropertyGroup, PropertyId};
    use crate::validators::Validator;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Fixed loader that counts how often it is consulted.
    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        values: Vec<(String, String)>,
    }

    impl Loader for CountingLoader {
        fn kind(&self) -> &'static str {
            "counting"
        }

        fn load(&self, _context: &LoadContext<'_>) -> Result<Vec<RawCandidate>, LoaderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(std::time::Duration::from_millis(20));
            Ok(self
                .values
                .iter()
                .map(|(name, value)| RawCandidate::text(name.as_str(), value.as_str(), "counting"))
                .collect())
        }
    }

    fn registry() -> Registry {
        Registry::from_pairs([
            (
                PropertyDecl::integer("TIMEOUT").default_value(50).build().unwrap(),
                PropertyGroup::root(),
            ),
            (
                PropertyDecl::string("SERVICE_URL")
                    .required()
                    .validator(Validator::EndsWith("/".to_string()))
                    .build()
                    .unwrap(),
                PropertyGroup::root(),
            ),
        ])
        .unwrap()
    }

    fn counting(url: &str) -> (Arc<AtomicUsize>, Box<dyn Loader>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = CountingLoader {
            calls: calls.clone(),
            values: vec![("SERVICE_URL".to_string(), url.to_string())],
        };
        (calls, Box::new(loader))
    }

    #[test]
    fn test_phases_on_success() {
        let (_, loader) = counting("http://x.com/");
        let context = ResolutionContext::new(registry(), vec![loader]);

        assert_eq!(context.phase(), ResolutionPhase::Unresolved);
        context.resolve().unwrap();
        assert_eq!(context.phase(), ResolutionPhase::Resolved);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (calls, loader) = counting("http://x.com/");
        let context = ResolutionContext::new(registry(), vec![loader]);

        let first = context.resolve().unwrap();
        let second = context.resolve().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_first_read_triggers_resolution() {
        let (calls, loader) = counting("http://x.com/");
        let context = ResolutionContext::new(registry(), vec![loader]);
        let timeout: Property<i64> = Property::new(PropertyId::from("TIMEOUT"));

        assert_eq!(context.get(&timeout).unwrap(), Some(50));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reads_after_failure_reraise_same_error() {
        let (calls, loader) = counting("http://x.com");
        let context = ResolutionContext::new(registry(), vec![loader]);
        let url: Property<String> = Property::new(PropertyId::from("SERVICE_URL"));

        let first = context.resolve().unwrap_err();
        assert_eq!(context.phase(), ResolutionPhase::Failed);

        match context.get(&url) {
            Err(AccessError::Resolution(again)) => assert!(first.same_failure(&again)),
            other => panic!("expected resolution error, got {:?}", other),
        }
        assert_eq!(first.problems().len(), 1);
        assert_eq!(first.problems()[0].kind, ProblemKind::ValidationFailure);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reset_allows_fresh_pass() {
        let (calls, loader) = counting("http://x.com/");
        let context = ResolutionContext::new(registry(), vec![loader]);

        context.resolve().unwrap();
        context.reset_for_tests();
        assert_eq!(context.phase(), ResolutionPhase::Unresolved);
        context.resolve().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_reads_run_pipeline_once() {
        let (calls, loader) = counting("http://x.com/");
        let context = ResolutionContext::new(registry(), vec![loader]);
        let barrier = Barrier::new(8);
        let url: Property<String> = Property::new(PropertyId::from("SERVICE_URL"));

        let snapshots: Vec<Arc<ValueSnapshot>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        assert_eq!(context.require(&url).unwrap(), "http://x.com/");
                        context.resolve().unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(snapshots.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_reset_serialized_with_reads() {
        let (calls, loader) = counting("http://x.com/");
        let context = ResolutionContext::new(registry(), vec![loader]);
        let timeout: Property<i64> = Property::new(PropertyId::from("TIMEOUT"));

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..5 {
                        assert_eq!(context.get(&timeout).unwrap(), Some(50));
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..3 {
                    context.reset_for_tests();
                }
            });
        });

        assert!(calls.load(Ordering::SeqCst) >= 1);
        assert_eq!(context.get(&timeout).unwrap(), Some(50));
    }

    #[test]
    fn test_options_policy() {
        let registry = Registry::from_pairs([(
            PropertyDecl::integer("port").build().unwrap(),
            PropertyGroup::new("server"),
        )])
        .unwrap();
        let loader = FixedValueLoader::new([("SERVER_PORT", "8080")]);
        let context = ResolutionContext::new(registry, vec![Box::new(loader)]).with_options(
            ResolverOptions::default().with_policy(Arc::new(crate::naming::RelaxedPolicy)),
        );
        let port: Property<i64> = Property::new(PropertyId::from("server.port"));

        assert_eq!(context.options().policy.name(), "relaxed");
        assert_eq!(context.get(&port).unwrap(), Some(8080));
    }
}
