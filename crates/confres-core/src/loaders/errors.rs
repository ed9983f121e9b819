//! Loader-level errors.

use crate::errors::ConfresError;

/// Errors a loader reports about its source as a whole.
///
/// The engine escalates these to problems only for loaders configured as
/// required; otherwise the loader is skipped.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("Source '{location}' not found")]
    SourceNotFound { location: String },

    #[error("Cannot read source '{location}': {message}")]
    SourceUnreadable { location: String, message: String },

    #[error("Source '{location}' is malformed at line {line}: {message}")]
    Malformed {
        location: String,
        line: usize,
        message: String,
    },

    #[error("Location of the source depends on property '{property}', which has no value yet")]
    LocationUnresolved { property: String },
}

impl ConfresError for LoaderError {
    fn error_code(&self) -> &'static str {
        match self {
            LoaderError::SourceNotFound { .. } => "LOADER_SOURCE_NOT_FOUND",
            LoaderError::SourceUnreadable { .. } => "LOADER_SOURCE_UNREADABLE",
            LoaderError::Malformed { .. } => "LOADER_SOURCE_MALFORMED",
            LoaderError::LocationUnresolved { .. } => "LOADER_LOCATION_UNRESOLVED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, LoaderError::SourceUnreadable { .. })
    }
}
