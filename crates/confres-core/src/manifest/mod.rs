//! # Manifest
//!
//! Declarative TOML intake: property groups, declarations and the ranked
//! loader pipeline. Building a manifest is the discovery step that produces
//! the (declaration, group) list the resolution engine consumes.
//!
//! ## Manifest Hierarchy
//!
//! 1. **Explicit path** - `confres resolve --manifest <path>`
//! 2. **Project manifest** - `./.confres/manifest.toml`
//! 3. **User manifest** - `~/.confres/manifest.toml`
//!
//! ## Usage Example
//!
//! ```rust
//! use confres_core::manifest::{build, parse_manifest};
//!
//! let manifest = parse_manifest(
//!     r#"
//! [[loaders]]
//! kind = "fixed"
//! values = { TIMEOUT = 60 }
//!
//! [[groups]]
//! [[groups.properties]]
//! name = "TIMEOUT"
//! type = "integer"
//! default = 50
//! "#,
//!     "inline",
//! )
//! .unwrap();
//!
//! let context = build(&manifest, &[]).unwrap().into_context();
//! let snapshot = context.resolve().unwrap();
//! assert_eq!(snapshot.len(), 1);
//! ```

pub mod build;
pub mod errors;
pub mod loading;
pub mod types;

pub use build::{BuiltManifest, build, build_loaders, build_options, build_registry};
pub use errors::ManifestError;
pub use loading::{discover, discover_in, load_manifest, parse_manifest};
pub use types::{AliasSpec, GroupSpec, LoaderSpec, Manifest, NamingSection, PropertySpec, ValidatorSpec};
