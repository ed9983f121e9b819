//! Naming strategy: canonical and alias effective names.
//!
//! - [`EffectiveName`] - literal name plus its normalized form and usage flags
//! - [`MatchingPolicy`] - pluggable normalization ([`UppercasePolicy`] by default)
//! - [`NameIndex`] - registry-wide lookup with conflict detection

pub mod operations;
pub mod policy;
pub mod types;

pub use operations::{NameIndex, canonical_name, effective_names};
pub use policy::{MatchingPolicy, RelaxedPolicy, UppercasePolicy, policy_by_name};
pub use types::{EffectiveName, EffectiveNames, NameConflict};
