//! Typed values and the tagged-variant value type.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::parsing;

/// A converted, typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Flag(bool),
    Float(f64),
    Duration(Duration),
    Path(PathBuf),
}

impl Value {
    /// Short name of the variant, used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "string",
            Value::Integer(_) => "integer",
            Value::Flag(_) => "flag",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::Path(_) => "path",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view used by range validators.
    ///
    /// Durations compare by whole milliseconds.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Duration(d) => Some(d.as_millis() as f64),
            _ => None,
        }
    }

    /// Length in characters for string-like values.
    pub fn text_len(&self) -> Option<usize> {
        match self {
            Value::Text(s) => Some(s.chars().count()),
            Value::Path(p) => Some(p.to_string_lossy().chars().count()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Flag(b) => write!(f, "{}", b),
            Value::Float(x) => write!(f, "{}", x),
            Value::Duration(d) => f.write_str(&parsing::format_duration(*d)),
            Value::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Value::Path(value)
    }
}

/// The domain a property's values live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Integer,
    Flag,
    Float,
    Duration,
    Path,
    /// Extension type; produces any [`Value`] variant from its parse function.
    Custom,
}

impl ValueKind {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueKind::Integer | ValueKind::Float | ValueKind::Duration
        )
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, ValueKind::Text | ValueKind::Path)
    }

    /// Whether a value of this variant may be stored for this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ValueKind::Custom, _)
                | (ValueKind::Text, Value::Text(_))
                | (ValueKind::Integer, Value::Integer(_))
                | (ValueKind::Flag, Value::Flag(_))
                | (ValueKind::Float, Value::Float(_))
                | (ValueKind::Duration, Value::Duration(_))
                | (ValueKind::Path, Value::Path(_))
        )
    }
}

/// Failure to turn raw text into a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot convert '{text}' to {target}: {reason}")]
pub struct ConversionError {
    pub text: String,
    pub target: String,
    pub reason: String,
}

pub type ParseFn = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;
pub type FormatFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Tagged-variant value type: a kind plus its parse/format pair.
#[derive(Clone)]
pub struct ValueType {
    name: String,
    kind: ValueKind,
    parse: ParseFn,
    format: FormatFn,
}

impl ValueType {
    fn builtin(name: &str, kind: ValueKind, parse: fn(&str) -> Result<Value, String>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            parse: Arc::new(parse),
            format: Arc::new(|value: &Value| value.to_string()),
        }
    }

    pub fn string() -> Self {
        Self::builtin("string", ValueKind::Text, parsing::parse_text)
    }

    pub fn integer() -> Self {
        Self::builtin("integer", ValueKind::Integer, parsing::parse_integer)
    }

    pub fn flag() -> Self {
        Self::builtin("flag", ValueKind::Flag, parsing::parse_flag)
    }

    pub fn float() -> Self {
        Self::builtin("float", ValueKind::Float, parsing::parse_float)
    }

    pub fn duration() -> Self {
        Self::builtin("duration", ValueKind::Duration, parsing::parse_duration)
    }

    pub fn path() -> Self {
        Self::builtin("path", ValueKind::Path, parsing::parse_path)
    }

    /// Extension type with caller-supplied conversion.
    pub fn custom<P, F>(name: impl Into<String>, parse: P, format: F) -> Self
    where
        P: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: ValueKind::Custom,
            parse: Arc::new(parse),
            format: Arc::new(format),
        }
    }

    /// Look up a built-in type by its manifest name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "string" | "text" => Some(Self::string()),
            "integer" | "int" => Some(Self::integer()),
            "flag" | "bool" | "boolean" => Some(Self::flag()),
            "float" => Some(Self::float()),
            "duration" => Some(Self::duration()),
            "path" => Some(Self::path()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_flag(&self) -> bool {
        self.kind == ValueKind::Flag
    }

    /// Convert raw text into a typed value.
    ///
    /// Callers must not pass blank text; blank input means "no value".
    pub fn parse(&self, text: &str) -> Result<Value, ConversionError> {
        let value = (self.parse)(text).map_err(|reason| ConversionError {
            text: text.to_string(),
            target: self.name.clone(),
            reason,
        })?;

        if !self.kind.accepts(&value) {
            return Err(ConversionError {
                text: text.to_string(),
                target: self.name.clone(),
                reason: format!("converter produced a {} value", value.type_name()),
            });
        }
        Ok(value)
    }

    pub fn format(&self, value: &Value) -> String {
        (self.format)(value)
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

/// Typed extraction from a resolved [`Value`].
pub trait FromValue: Sized {
    /// Human-readable name of the Rust-side type, for access errors.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            Value::Path(p) => Some(p.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

macro_rules! impl_from_value_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                const EXPECTED: &'static str = stringify!($t);

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Integer(i) => <$t>::try_from(*i).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i32, u16, u32, u64, usize);

impl FromValue for bool {
    const EXPECTED: &'static str = "flag";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for Duration {
    const EXPECTED: &'static str = "duration";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    const EXPECTED: &'static str = "path";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Path(p) => Some(p.clone()),
            Value::Text(s) => Some(PathBuf::from(s)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types_parse() {
        assert_eq!(ValueType::integer().parse("42").unwrap(), Value::Integer(42));
        assert_eq!(ValueType::flag().parse("TRUE").unwrap(), Value::Flag(true));
        assert_eq!(
            ValueType::string().parse("http://x.com/").unwrap(),
            Value::Text("http://x.com/".to_string())
        );
        assert_eq!(
            ValueType::duration().parse("250ms").unwrap(),
            Value::Duration(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_conversion_error_carries_text_and_target() {
        let err = ValueType::integer().parse("fifty").unwrap_err();
        assert_eq!(err.text, "fifty");
        assert_eq!(err.target, "integer");
        assert!(err.to_string().starts_with("cannot convert 'fifty' to integer"));
    }

    #[test]
    fn test_custom_type() {
        let level = ValueType::custom(
            "level",
            |text| match text.to_lowercase().as_str() {
                "low" => Ok(Value::Integer(1)),
                "high" => Ok(Value::Integer(9)),
                other => Err(format!("unknown level '{}'", other)),
            },
            |value| match value {
                Value::Integer(1) => "low".to_string(),
                _ => "high".to_string(),
            },
        );

        assert_eq!(level.kind(), ValueKind::Custom);
        assert_eq!(level.parse("HIGH").unwrap(), Value::Integer(9));
        assert_eq!(level.format(&Value::Integer(1)), "low");
        assert!(level.parse("medium").unwrap_err().reason.contains("medium"));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ValueType::from_name("INT").unwrap().kind(), ValueKind::Integer);
        assert_eq!(ValueType::from_name("boolean").unwrap().kind(), ValueKind::Flag);
        assert!(ValueType::from_name("matrix").is_none());
    }

    #[test]
    fn test_from_value_narrowing() {
        assert_eq!(u16::from_value(&Value::Integer(8080)), Some(8080));
        assert_eq!(u16::from_value(&Value::Integer(70000)), None);
        assert_eq!(bool::from_value(&Value::Integer(1)), None);
        assert_eq!(f64::from_value(&Value::Integer(3)), Some(3.0));
    }

    #[test]
    fn test_kind_accepts() {
        assert!(ValueKind::Integer.accepts(&Value::Integer(1)));
        assert!(!ValueKind::Integer.accepts(&Value::Flag(true)));
        assert!(ValueKind::Custom.accepts(&Value::Flag(true)));
    }
}
