//! Property declarations, groups and the registry.
//!
//! # Architecture
//!
//! - [`PropertyDecl`] - Immutable declaration: type, default, aliases, validators
//! - [`PropertyBuilder`] - Builds declarations and pre-validates defaults
//! - [`PropertyGroup`] - Namespace supplying the canonical-name prefix
//! - [`Registry`] - Ordered intake of (declaration, group) pairs
//!
//! # Usage
//!
//! ```rust
//! use confres_core::properties::{PropertyDecl, PropertyGroup, Registry};
//! use confres_core::validators::Validator;
//!
//! let mut registry = Registry::new();
//! let root = PropertyGroup::root();
//! registry
//!     .register(&root, PropertyDecl::integer("TIMEOUT").default_value(50).build().unwrap())
//!     .unwrap();
//! registry
//!     .register(
//!         &root,
//!         PropertyDecl::string("SERVICE_URL")
//!             .required()
//!             .validator(Validator::EndsWith("/".to_string()))
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//! assert_eq!(registry.len(), 2);
//! ```

pub mod builder;
pub mod errors;
pub mod registry;
pub mod types;

pub use builder::PropertyBuilder;
pub use errors::DeclarationError;
pub use registry::{RegisteredProperty, Registry};
pub use types::{Alias, AliasUsage, Property, PropertyDecl, PropertyGroup, PropertyId};
