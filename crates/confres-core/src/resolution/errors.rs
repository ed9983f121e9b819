//! Resolution and access errors.

use std::fmt;
use std::sync::Arc;

use crate::errors::ConfresError;
use crate::problems::{Problem, render_report};
use crate::properties::PropertyId;

/// The aggregated fatal error of a failed resolution pass.
///
/// Carries every problem in the order it was recorded, plus a sample
/// properties file operators can fill in. Cloning shares the same problem
/// list, so each read after failure re-raises the identical error.
#[derive(Clone)]
pub struct ResolutionError {
    problems: Arc<[Problem]>,
    sample: Option<Arc<str>>,
}

impl ResolutionError {
    pub fn new(problems: Vec<Problem>, sample: Option<String>) -> Self {
        Self {
            problems: problems.into(),
            sample: sample.map(Into::into),
        }
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn sample(&self) -> Option<&str> {
        self.sample.as_deref()
    }

    /// The numbered problem list without the sample.
    pub fn report(&self) -> String {
        render_report(&self.problems)
    }

    /// Whether both values are the same failure, not merely equal ones.
    pub fn same_failure(&self, other: &ResolutionError) -> bool {
        Arc::ptr_eq(&self.problems, &other.problems)
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())?;
        if let Some(sample) = &self.sample {
            write!(f, "\n{}", sample)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionError")
            .field("problems", &self.problems)
            .finish_non_exhaustive()
    }
}

impl std::error::Error for ResolutionError {}

impl ConfresError for ResolutionError {
    fn error_code(&self) -> &'static str {
        "RESOLUTION_FAILED"
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

/// Errors reading a value out of a resolved configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AccessError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Property '{property}' is not registered")]
    UnknownProperty { property: PropertyId },

    #[error("Property '{property}' holds a value of type {actual}, expected {expected}")]
    TypeMismatch {
        property: PropertyId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Property '{property}' has no value")]
    Unset { property: PropertyId },

    #[error("No process-wide resolution context has been installed")]
    NotInstalled,

    #[error("A process-wide resolution context is already installed")]
    AlreadyInstalled,
}

impl ConfresError for AccessError {
    fn error_code(&self) -> &'static str {
        match self {
            AccessError::Resolution(_) => "RESOLUTION_FAILED",
            AccessError::UnknownProperty { .. } => "PROPERTY_UNKNOWN",
            AccessError::TypeMismatch { .. } => "PROPERTY_TYPE_MISMATCH",
            AccessError::Unset { .. } => "PROPERTY_UNSET",
            AccessError::NotInstalled => "CONTEXT_NOT_INSTALLED",
            AccessError::AlreadyInstalled => "CONTEXT_ALREADY_INSTALLED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, AccessError::Resolution(_) | AccessError::Unset { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> ResolutionError {
        ResolutionError::new(
            vec![Problem::missing_required(
                &PropertyId::from("SERVICE_URL"),
                &["SERVICE_URL".to_string()],
            )],
            Some("# Expected properties file format (key=value)\nSERVICE_URL=\n".to_string()),
        )
    }

    #[test]
    fn test_display_includes_report_and_sample() {
        let text = failure().to_string();
        assert!(text.starts_with("Configuration resolution failed with 1 problem:\n"));
        assert!(text.contains("[MISSING_REQUIRED_VALUE]"));
        assert!(text.ends_with("SERVICE_URL=\n"));
    }

    #[test]
    fn test_clone_is_same_failure() {
        let error = failure();
        let copy = error.clone();
        assert!(error.same_failure(&copy));
        assert!(!error.same_failure(&failure()));
    }

    #[test]
    fn test_access_error_wraps_resolution_error() {
        let error: AccessError = failure().into();
        assert_eq!(error.error_code(), "RESOLUTION_FAILED");
        assert!(error.is_user_error());
        assert!(error.to_string().contains("SERVICE_URL"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let error = AccessError::TypeMismatch {
            property: PropertyId::from("TIMEOUT"),
            expected: "string",
            actual: "integer",
        };
        assert_eq!(
            error.to_string(),
            "Property 'TIMEOUT' holds a value of type integer, expected string"
        );
        assert!(!error.is_user_error());
    }
}
