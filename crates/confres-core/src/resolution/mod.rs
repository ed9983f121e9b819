//! Resolution engine, Value Snapshot and the resolution state machine.
//!
//! # Architecture
//!
//! - [`engine::resolve`] - One pass: names, ranked loaders, conversion, validation, defaults
//! - [`ResolutionContext`] - `Unresolved -> Resolving -> Resolved | Failed` with a single-run guard
//! - [`ValueSnapshot`] - Immutable typed values published on success
//! - [`ResolutionError`] - Aggregated fatal error carrying every problem
//! - [`global`] - Optional process-wide context with lazy reads
//!
//! # Usage
//!
//! ```rust
//! use confres_core::loaders::FixedValueLoader;
//! use confres_core::properties::{PropertyDecl, PropertyGroup, Registry};
//! use confres_core::resolution::ResolutionContext;
//!
//! let mut registry = Registry::new();
//! let timeout = registry
//!     .register_typed::<i64>(
//!         &PropertyGroup::root(),
//!         PropertyDecl::integer("TIMEOUT").default_value(50).build().unwrap(),
//!     )
//!     .unwrap();
//!
//! let context = ResolutionContext::new(
//!     registry,
//!     vec![Box::new(FixedValueLoader::new([("timeout", "60")]))],
//! );
//! assert_eq!(context.get(&timeout).unwrap(), Some(60));
//! ```

pub mod context;
pub mod engine;
pub mod errors;
pub mod global;
pub mod snapshot;

pub use context::{ResolutionContext, ResolutionPhase, ResolverOptions};
pub use engine::resolve;
pub use errors::{AccessError, ResolutionError};
pub use snapshot::{ResolvedValue, ValueOrigin, ValueSnapshot};
