//! Declaration-time errors.
//!
//! These are defects in how a property was declared or registered. They are
//! raised while building the registry, before any resolution pass.

use crate::errors::ConfresError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    #[error("Property identity must not be blank")]
    BlankIdentity,

    #[error("Property '{property}' declares a blank alias")]
    BlankAlias { property: String },

    #[error("Property '{property}' ({value_type}) cannot use the '{rule}' validator")]
    IncompatibleValidator {
        property: String,
        value_type: String,
        rule: String,
    },

    #[error("Default for property '{property}' is invalid: {message}")]
    InvalidDefault { property: String, message: String },

    #[error("Default for property '{property}' fails the '{rule}' validator: {message}")]
    DefaultFailsValidation {
        property: String,
        rule: String,
        message: String,
    },

    #[error("Property '{property}' is already registered")]
    DuplicateProperty { property: String },
}

impl ConfresError for DeclarationError {
    fn error_code(&self) -> &'static str {
        match self {
            DeclarationError::BlankIdentity => "BLANK_IDENTITY",
            DeclarationError::BlankAlias { .. } => "BLANK_ALIAS",
            DeclarationError::IncompatibleValidator { .. } => "INCOMPATIBLE_VALIDATOR",
            DeclarationError::InvalidDefault { .. } => "INVALID_DEFAULT",
            DeclarationError::DefaultFailsValidation { .. } => "DEFAULT_FAILS_VALIDATION",
            DeclarationError::DuplicateProperty { .. } => "DUPLICATE_PROPERTY",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
