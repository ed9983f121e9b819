//! Loaders: rank-ordered configuration sources.
//!
//! # Architecture
//!
//! - [`Loader`] - Trait every source implements
//! - [`RawCandidate`] - Unvalidated name/value/source triple a loader yields
//! - [`LoadContext`] - Known names and values resolved by earlier loaders
//! - [`LoaderError`] - Source-level failures (missing, unreadable, malformed)
//! - [`backends`] - Fixed map, command line, environment, properties file, directory
//!
//! # Usage
//!
//! ```rust
//! use confres_core::loaders::{FixedValueLoader, Loader};
//!
//! let loader = FixedValueLoader::new([("TIMEOUT", "60")]).named("overrides");
//! assert_eq!(loader.kind(), "fixed");
//! assert_eq!(loader.label(), "overrides");
//! ```

pub mod backends;
pub mod errors;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use backends::{
    CommandLineLoader, DirectoryLoader, EnvironmentLoader, FileLocation, FixedValueLoader,
    PropertiesFileLoader, parse_properties,
};
pub use errors::LoaderError;
pub use traits::Loader;
pub use types::{LoadContext, RawCandidate, RawValue};
