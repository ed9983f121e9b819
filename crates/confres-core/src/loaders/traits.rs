//! Loader trait definition.

use super::errors::LoaderError;
use super::types::{LoadContext, RawCandidate};

/// Trait defining the interface for configuration sources.
///
/// Each source (fixed map, command line, environment, directory, properties
/// file) implements this trait to extract raw name/text candidates. Loaders
/// are rank-ordered by the caller; the first loader supplying a usable value
/// for a property wins.
pub trait Loader: Send + Sync {
    /// The kind of source (e.g., "environment", "properties-file").
    fn kind(&self) -> &'static str;

    /// Label identifying this instance in problems and value origins.
    ///
    /// Default implementation returns the kind.
    fn label(&self) -> String {
        self.kind().to_string()
    }

    /// Whether failing to access the source is a problem rather than a skip.
    fn is_required(&self) -> bool {
        false
    }

    /// Extract raw candidates from the source.
    fn load(&self, context: &LoadContext<'_>) -> Result<Vec<RawCandidate>, LoaderError>;
}
