//! Validator set for converted property values.
//!
//! Validators run in declaration order and every validator runs even after
//! an earlier one fails, so one candidate can produce several failures.

pub mod types;

pub use types::Validator;

use crate::values::Value;

/// One failed rule for one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub rule: String,
    /// Full message; may quote the checked value.
    pub message: String,
    /// The rule's demand alone, safe to show for secret properties.
    pub requirement: String,
}

/// Run every validator against `value` and collect the failures in order.
pub fn run_validators(validators: &[Validator], value: Option<&Value>) -> Vec<ValidationFailure> {
    validators
        .iter()
        .filter_map(|validator| {
            validator
                .check(value)
                .err()
                .map(|message| ValidationFailure {
                    rule: validator.rule().to_string(),
                    message,
                    requirement: validator.requirement(),
                })
        })
        .collect()
}
