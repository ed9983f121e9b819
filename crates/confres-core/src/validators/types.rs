//! Per-property value constraints.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::values::{Value, ValueKind};

pub type CheckFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// One declared constraint on a property's converted value.
#[derive(Clone)]
pub enum Validator {
    /// The property must end up with a value (from a loader or its default).
    NotNull,
    /// `value >= bound`. Durations compare in milliseconds.
    AtLeast(f64),
    /// `value < bound`. Durations compare in milliseconds.
    LessThan(f64),
    /// The whole text must match the pattern.
    MatchesRegex { pattern: String, regex: Regex },
    StartsWith(String),
    EndsWith(String),
    /// Text must equal one of the listed values (case-sensitive).
    OneOf(Vec<String>),
    MinLength(usize),
    /// Permits an empty string to be stored instead of treating it as "no value".
    AllowEmpty,
    Custom { name: String, check: CheckFn },
}

impl Validator {
    /// Build an anchored regex validator.
    pub fn matches_regex(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Validator::MatchesRegex {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        Validator::Custom {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Stable rule name, as used in manifests and problem messages.
    pub fn rule(&self) -> &str {
        match self {
            Validator::NotNull => "not-null",
            Validator::AtLeast(_) => "at-least",
            Validator::LessThan(_) => "less-than",
            Validator::MatchesRegex { .. } => "matches-regex",
            Validator::StartsWith(_) => "starts-with",
            Validator::EndsWith(_) => "ends-with",
            Validator::OneOf(_) => "one-of",
            Validator::MinLength(_) => "min-length",
            Validator::AllowEmpty => "allow-empty",
            Validator::Custom { name, .. } => name,
        }
    }

    /// Whether this validator can be declared on a property of `kind`.
    pub fn is_compatible_with(&self, kind: ValueKind) -> bool {
        if kind == ValueKind::Custom {
            return true;
        }
        match self {
            Validator::NotNull | Validator::OneOf(_) | Validator::Custom { .. } => true,
            Validator::AtLeast(_) | Validator::LessThan(_) => kind.is_numeric(),
            Validator::MatchesRegex { .. }
            | Validator::StartsWith(_)
            | Validator::EndsWith(_)
            | Validator::MinLength(_) => kind.is_textual(),
            Validator::AllowEmpty => kind == ValueKind::Text,
        }
    }

    /// What the rule demands, without mentioning any checked value.
    pub fn requirement(&self) -> String {
        match self {
            Validator::NotNull => "a value is required but none was supplied".to_string(),
            Validator::AtLeast(bound) => format!("must be greater than or equal to {}", bound),
            Validator::LessThan(bound) => format!("must be less than {}", bound),
            Validator::MatchesRegex { pattern, .. } => {
                format!("must match the pattern '{}'", pattern)
            }
            Validator::StartsWith(prefix) => format!("must start with '{}'", prefix),
            Validator::EndsWith(suffix) => format!("must end with '{}'", suffix),
            Validator::OneOf(allowed) => format!("must be one of: {}", allowed.join(", ")),
            Validator::MinLength(min) => format!("must be at least {} characters long", min),
            Validator::AllowEmpty => "may be empty".to_string(),
            Validator::Custom { name, .. } => format!("must pass the '{}' check", name),
        }
    }

    pub fn permits_empty(&self) -> bool {
        matches!(self, Validator::AllowEmpty)
    }

    /// Check a value, or the absence of one.
    ///
    /// Only [`Validator::NotNull`] inspects a missing value; every other rule
    /// passes on `None` so one missing value yields one failure.
    pub fn check(&self, value: Option<&Value>) -> Result<(), String> {
        let Some(value) = value else {
            return match self {
                Validator::NotNull => Err("a value is required but none was supplied".to_string()),
                _ => Ok(()),
            };
        };

        match self {
            Validator::NotNull | Validator::AllowEmpty => Ok(()),
            Validator::AtLeast(bound) => {
                let number = numeric(value)?;
                if number >= *bound {
                    Ok(())
                } else {
                    Err(format!("{} (was {})", self.requirement(), value))
                }
            }
            Validator::LessThan(bound) => {
                let number = numeric(value)?;
                if number < *bound {
                    Ok(())
                } else {
                    Err(format!("{} (was {})", self.requirement(), value))
                }
            }
            Validator::MatchesRegex { pattern, regex } => {
                if regex.is_match(&textual(value)) {
                    Ok(())
                } else {
                    Err(format!("must match the pattern '{}'", pattern))
                }
            }
            Validator::StartsWith(prefix) => {
                if textual(value).starts_with(prefix.as_str()) {
                    Ok(())
                } else {
                    Err(format!("must start with '{}'", prefix))
                }
            }
            Validator::EndsWith(suffix) => {
                if textual(value).ends_with(suffix.as_str()) {
                    Ok(())
                } else {
                    Err(format!("must end with '{}'", suffix))
                }
            }
            Validator::OneOf(allowed) => {
                let text = textual(value);
                if allowed.iter().any(|a| *a == text) {
                    Ok(())
                } else {
                    Err(format!("must be one of: {}", allowed.join(", ")))
                }
            }
            Validator::MinLength(min) => {
                let len = value.text_len().unwrap_or_else(|| value.to_string().chars().count());
                if len >= *min {
                    Ok(())
                } else {
                    Err(format!("must be at least {} characters long", min))
                }
            }
            Validator::Custom { check, .. } => check(value),
        }
    }
}

fn numeric(value: &Value) -> Result<f64, String> {
    value
        .as_number()
        .ok_or_else(|| format!("expected a numeric value, got {}", value.type_name()))
}

fn textual(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::AtLeast(bound) | Validator::LessThan(bound) => {
                write!(f, "{}({})", self.rule(), bound)
            }
            Validator::MatchesRegex { pattern, .. } => write!(f, "matches-regex({})", pattern),
            Validator::StartsWith(s) | Validator::EndsWith(s) => {
                write!(f, "{}({:?})", self.rule(), s)
            }
            Validator::OneOf(allowed) => write!(f, "one-of({:?})", allowed),
            Validator::MinLength(min) => write!(f, "min-length({})", min),
            other => f.write_str(other.rule()),
        }
    }
}
