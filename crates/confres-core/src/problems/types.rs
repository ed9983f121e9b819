//! Problem data structures and the problem aggregator.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::naming::NameConflict;
use crate::properties::PropertyId;
use crate::validators::ValidationFailure;
use crate::values::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemKind {
    NamingConflict,
    ConversionFailure,
    ValidationFailure,
    MissingRequiredValue,
    LoaderAccessFailure,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::NamingConflict => "NAMING_CONFLICT",
            ProblemKind::ConversionFailure => "CONVERSION_FAILURE",
            ProblemKind::ValidationFailure => "VALIDATION_FAILURE",
            ProblemKind::MissingRequiredValue => "MISSING_REQUIRED_VALUE",
            ProblemKind::LoaderAccessFailure => "LOADER_ACCESS_FAILURE",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub kind: ProblemKind,
    /// The property concerned, when there is exactly one.
    pub property: Option<PropertyId>,
    /// The offending name (candidate name or conflicting normalized name).
    pub name: Option<String>,
    /// The loader involved, if any.
    pub source: Option<String>,
    pub message: String,
}

impl Problem {
    pub fn naming_conflict(conflict: &NameConflict) -> Self {
        Self {
            kind: ProblemKind::NamingConflict,
            property: None,
            name: Some(conflict.normalized.clone()),
            source: None,
            message: format!("Naming conflict: {}", conflict.describe()),
        }
    }

    /// Conversion failure. The raw text is withheld for secret properties.
    pub fn conversion_failure(
        property: &PropertyId,
        name: &str,
        source: &str,
        error: &ConversionError,
        secret: bool,
    ) -> Self {
        let detail = if secret {
            format!("cannot convert the supplied value to {}", error.target)
        } else {
            error.to_string()
        };
        Self {
            kind: ProblemKind::ConversionFailure,
            property: Some(property.clone()),
            name: Some(name.to_string()),
            source: Some(source.to_string()),
            message: format!(
                "Value for '{}' supplied by {} as '{}' is invalid: {}",
                property, source, name, detail
            ),
        }
    }

    /// Validation failure for a loaded value, or for a missing value when
    /// `source` is `None`. Secret properties only show the rule's requirement.
    pub fn validation_failure(
        property: &PropertyId,
        name: Option<&str>,
        source: Option<&str>,
        failure: &ValidationFailure,
        secret: bool,
    ) -> Self {
        let detail = if secret {
            &failure.requirement
        } else {
            &failure.message
        };
        let origin = match (source, name) {
            (Some(source), Some(name)) => format!(" supplied by {} as '{}'", source, name),
            (Some(source), None) => format!(" supplied by {}", source),
            _ => String::new(),
        };
        Self {
            kind: ProblemKind::ValidationFailure,
            property: Some(property.clone()),
            name: name.map(str::to_string),
            source: source.map(str::to_string),
            message: format!(
                "Value for '{}'{} fails '{}': {}",
                property, origin, failure.rule, detail
            ),
        }
    }

    pub fn missing_required(property: &PropertyId, accepted_names: &[String]) -> Self {
        let hint = if accepted_names.is_empty() {
            " (the property has no usable name, so no loader can supply it)".to_string()
        } else {
            format!("; set one of: {}", accepted_names.join(", "))
        };
        Self {
            kind: ProblemKind::MissingRequiredValue,
            property: Some(property.clone()),
            name: accepted_names.first().cloned(),
            source: None,
            message: format!("Required property '{}' has no value{}", property, hint),
        }
    }

    pub fn loader_access_failure(source: &str, message: &str) -> Self {
        Self {
            kind: ProblemKind::LoaderAccessFailure,
            property: None,
            name: None,
            source: Some(source.to_string()),
            message: format!("Required source {} is unavailable: {}", source, message),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Collects problems across a whole resolution pass.
///
/// Problems are never raised individually; the pipeline keeps going and the
/// full ordered list is handed over at the end.
#[derive(Debug, Default)]
pub struct ProblemCollector {
    problems: Vec<Problem>,
}

impl ProblemCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, problem: Problem) {
        warn!(
            event = "core.resolution.problem_recorded",
            kind = problem.kind.as_str(),
            property = problem.property.as_ref().map(|p| p.as_str()),
            source = problem.source.as_deref(),
            name = problem.name.as_deref()
        );
        self.problems.push(problem);
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<Problem> {
        self.problems
    }
}
