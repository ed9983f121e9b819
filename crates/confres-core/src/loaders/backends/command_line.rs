//! Command-line loader: `name=value` tokens and bare flags.

use crate::loaders::errors::LoaderError;
use crate::loaders::traits::Loader;
use crate::loaders::types::{LoadContext, RawCandidate};

/// Loader that reads `name=value` tokens from an argument vector.
///
/// Leading dashes are stripped, so `--timeout=60`, `-timeout=60` and
/// `timeout=60` are equivalent. A token with no `=` is a bare flag
/// (`--verbose`). Tokens after a lone `--` are not read.
#[derive(Debug, Clone, Default)]
pub struct CommandLineLoader {
    args: Vec<String>,
}

impl CommandLineLoader {
    pub fn new<S: Into<String>>(args: impl IntoIterator<Item = S>) -> Self {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the process arguments, skipping the program name.
    pub fn from_process() -> Self {
        Self::new(std::env::args().skip(1))
    }

    fn parse_token(token: &str) -> Option<(&str, Option<&str>)> {
        let stripped = token
            .strip_prefix("--")
            .or_else(|| token.strip_prefix('-'))
            .unwrap_or(token);

        let (name, value) = match stripped.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value)),
            None => (stripped.trim(), None),
        };
        if name.is_empty() {
            return None;
        }
        Some((name, value))
    }
}

impl Loader for CommandLineLoader {
    fn kind(&self) -> &'static str {
        "command-line"
    }

    fn load(&self, context: &LoadContext<'_>) -> Result<Vec<RawCandidate>, LoaderError> {
        let label = self.label();
        let candidates = self
            .args
            .iter()
            .take_while(|token| token.as_str() != "--")
            .filter_map(|token| Self::parse_token(token))
            .filter(|(name, _)| context.is_known(name))
            .map(|(name, value)| match value {
                Some(value) => RawCandidate::text(name, value, &label),
                None => RawCandidate::bare(name, &label),
            })
            .collect();
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::test_support::with_context;
    use crate::loaders::types::RawValue;

    const KNOWN: &[&str] = &["TIMEOUT", "verbose", "SERVICE_URL"];

    #[test]
    fn test_parses_name_value_tokens() {
        let loader = CommandLineLoader::new(["--timeout=60", "SERVICE_URL=http://x.com/?a=b"]);
        let candidates = with_context(KNOWN, |ctx| loader.load(ctx).unwrap());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "timeout");
        assert_eq!(candidates[0].value, RawValue::Text("60".to_string()));
        assert_eq!(
            candidates[1].value,
            RawValue::Text("http://x.com/?a=b".to_string())
        );
        assert_eq!(candidates[1].source, "command-line");
    }

    #[test]
    fn test_bare_flag() {
        let loader = CommandLineLoader::new(["--verbose"]);
        let candidates = with_context(KNOWN, |ctx| loader.load(ctx).unwrap());
        assert_eq!(candidates, vec![RawCandidate::bare("verbose", "command-line")]);
    }

    #[test]
    fn test_empty_value_is_text_not_bare() {
        let loader = CommandLineLoader::new(["TIMEOUT="]);
        let candidates = with_context(KNOWN, |ctx| loader.load(ctx).unwrap());
        assert_eq!(candidates[0].value, RawValue::Text(String::new()));
    }

    #[test]
    fn test_unknown_and_degenerate_tokens_skipped() {
        let loader = CommandLineLoader::new(["--", "TIMEOUT=5"]);
        let candidates = with_context(KNOWN, |ctx| loader.load(ctx).unwrap());
        assert!(candidates.is_empty());

        let loader = CommandLineLoader::new(["-", "=5", "positional", "--color=always"]);
        let candidates = with_context(KNOWN, |ctx| loader.load(ctx).unwrap());
        assert!(candidates.is_empty());
    }
}
