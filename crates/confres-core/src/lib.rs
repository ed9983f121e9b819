//! confres-core: Core library for ranked, validated, fail-fast configuration resolution
//!
//! Properties are declared once with a type, default, aliases and validators.
//! A ranked list of loaders supplies raw name/value candidates; the engine
//! matches them case-insensitively, converts and validates them, and either
//! publishes one immutable snapshot or fails with every problem at once.
//!
//! # Main Entry Points
//!
//! - [`properties`] - Declare properties and register them
//! - [`loaders`] - Configuration sources
//! - [`resolution`] - Run the pipeline and read resolved values
//! - [`manifest`] - Declarative TOML intake
//! - [`problems`] - Problem reports and properties-file samples

pub mod errors;
pub mod events;
pub mod loaders;
pub mod logging;
pub mod manifest;
pub mod naming;
pub mod problems;
pub mod properties;
pub mod resolution;
pub mod validators;
pub mod values;

// Re-export commonly used types at crate root for convenience
pub use errors::{ConfresError, ConfresResult};
pub use loaders::{Loader, LoaderError};
pub use manifest::{Manifest, ManifestError};
pub use naming::{MatchingPolicy, RelaxedPolicy, UppercasePolicy};
pub use problems::{Problem, ProblemKind};
pub use properties::{
    AliasUsage, DeclarationError, Property, PropertyDecl, PropertyGroup, PropertyId, Registry,
};
pub use resolution::{
    AccessError, ResolutionContext, ResolutionError, ResolutionPhase, ResolverOptions,
    ValueOrigin, ValueSnapshot,
};
pub use validators::Validator;
pub use values::{Value, ValueType};

// Re-export logging initialization
pub use logging::init_logging;
