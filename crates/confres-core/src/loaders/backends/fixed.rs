//! Fixed-value loader: a pre-seeded map for overrides and tests.

use crate::loaders::errors::LoaderError;
use crate::loaders::traits::Loader;
use crate::loaders::types::{LoadContext, RawCandidate};

/// Loader backed by an in-memory list of name/value pairs.
#[derive(Debug, Clone, Default)]
pub struct FixedValueLoader {
    label: Option<String>,
    values: Vec<(String, String)>,
}

impl FixedValueLoader {
    pub fn new<N, V>(values: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            label: None,
            values: values
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Give this instance its own label (e.g., "overrides").
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push((name.into(), value.into()));
        self
    }
}

impl Loader for FixedValueLoader {
    fn kind(&self) -> &'static str {
        "fixed"
    }

    fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.kind().to_string())
    }

    fn load(&self, _context: &LoadContext<'_>) -> Result<Vec<RawCandidate>, LoaderError> {
        let label = self.label();
        Ok(self
            .values
            .iter()
            .map(|(name, value)| RawCandidate::text(name.as_str(), value.as_str(), &label))
            .collect())
    }
}
