use crate::errors::ConfresError;
use crate::properties::DeclarationError;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Manifest '{path}' not found")]
    NotFound { path: String },

    #[error("Failed to read manifest '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse manifest '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Unknown naming policy '{policy}'. Supported: uppercase, relaxed")]
    UnknownPolicy { policy: String },

    #[error("Property '{property}' has unknown type '{type_name}'")]
    UnknownType { property: String, type_name: String },

    #[error("Property '{property}' has invalid regex '{pattern}': {message}")]
    InvalidRegex {
        property: String,
        pattern: String,
        message: String,
    },

    #[error("Loader #{position} is invalid: {message}")]
    InvalidLoader { position: usize, message: String },

    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

impl ConfresError for ManifestError {
    fn error_code(&self) -> &'static str {
        match self {
            ManifestError::NotFound { .. } => "MANIFEST_NOT_FOUND",
            ManifestError::ReadFailed { .. } => "MANIFEST_READ_FAILED",
            ManifestError::ParseFailed { .. } => "MANIFEST_PARSE_FAILED",
            ManifestError::UnknownPolicy { .. } => "MANIFEST_UNKNOWN_POLICY",
            ManifestError::UnknownType { .. } => "MANIFEST_UNKNOWN_TYPE",
            ManifestError::InvalidRegex { .. } => "MANIFEST_INVALID_REGEX",
            ManifestError::InvalidLoader { .. } => "MANIFEST_INVALID_LOADER",
            ManifestError::Declaration(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, ManifestError::ReadFailed { .. })
    }
}
