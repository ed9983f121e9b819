//! Value types and converters.
//!
//! - [`ValueType`] - Tagged-variant type: a [`ValueKind`] plus parse/format functions
//! - [`Value`] - A converted, typed value
//! - [`FromValue`] - Typed extraction used by snapshot accessors
//! - [`ConversionError`] - Raw text that could not be converted

pub mod parsing;
pub mod types;

pub use types::{ConversionError, FromValue, Value, ValueKind, ValueType};
