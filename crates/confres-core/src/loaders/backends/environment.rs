//! Environment loader: the process's ambient key-value store.

use tracing::debug;

use crate::loaders::errors::LoaderError;
use crate::loaders::traits::Loader;
use crate::loaders::types::{LoadContext, RawCandidate};

/// Loader over a captured set of environment variables.
///
/// Variables are captured when the loader is built, so a resolution pass
/// sees one consistent view. With a prefix, only variables carrying it are
/// considered and the prefix is stripped before matching.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentLoader {
    vars: Vec<(String, String)>,
    prefix: Option<String>,
}

impl EnvironmentLoader {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self { vars, prefix: None }
    }

    pub fn from_vars<N, V>(vars: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    fn strip_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        match &self.prefix {
            None => Some(name),
            Some(prefix) => {
                let head = name.get(..prefix.len())?;
                if head.eq_ignore_ascii_case(prefix) {
                    name.get(prefix.len()..).filter(|rest| !rest.is_empty())
                } else {
                    None
                }
            }
        }
    }
}

impl Loader for EnvironmentLoader {
    fn kind(&self) -> &'static str {
        "environment"
    }

    fn label(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("environment({}*)", prefix),
            None => self.kind().to_string(),
        }
    }

    fn load(&self, context: &LoadContext<'_>) -> Result<Vec<RawCandidate>, LoaderError> {
        let label = self.label();
        let candidates: Vec<RawCandidate> = self
            .vars
            .iter()
            .filter_map(|(name, value)| Some((self.strip_prefix(name)?, value)))
            .filter(|(name, _)| context.is_known(name))
            .map(|(name, value)| RawCandidate::text(name, value.as_str(), &label))
            .collect();

        debug!(
            event = "core.loader.environment_scanned",
            variables = self.vars.len(),
            matched = candidates.len()
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::test_support::with_context;

    #[test]
    fn test_only_known_variables_returned() {
        let loader = EnvironmentLoader::from_vars([
            ("PATH", "/usr/bin"),
            ("timeout", "60"),
            ("HOME", "/root"),
        ]);
        let candidates = with_context(&["TIMEOUT"], |ctx| loader.load(ctx).unwrap());

        assert_eq!(candidates, vec![RawCandidate::text("timeout", "60", "environment")]);
    }

    #[test]
    fn test_prefix_is_stripped() {
        let loader =
            EnvironmentLoader::from_vars([("APP_TIMEOUT", "60"), ("TIMEOUT", "1"), ("APP_", "x")])
                .with_prefix("app_");
        let candidates = with_context(&["TIMEOUT"], |ctx| loader.load(ctx).unwrap());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "TIMEOUT");
        assert_eq!(candidates[0].source, "environment(app_*)");
    }

    #[test]
    fn test_from_process_captures_path() {
        let loader = EnvironmentLoader::from_process();
        let candidates = with_context(&["PATH"], |ctx| loader.load(ctx).unwrap());
        let expected = usize::from(std::env::var("PATH").is_ok());
        assert_eq!(candidates.len(), expected);
    }
}
