//! Properties-file loader: a flat `key=value` resource.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::loaders::errors::LoaderError;
use crate::loaders::traits::Loader;
use crate::loaders::types::{LoadContext, RawCandidate};
use crate::properties::PropertyId;
use crate::values::Value;
use crate::values::parsing::expand_home;

/// Where the properties file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLocation {
    Path(PathBuf),
    /// Path taken from a property resolved by a higher-ranked loader.
    FromProperty(PropertyId),
}

#[derive(Debug, Clone)]
pub struct PropertiesFileLoader {
    location: FileLocation,
    required: bool,
}

impl PropertiesFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: FileLocation::Path(path.into()),
            required: false,
        }
    }

    pub fn from_property(property: PropertyId) -> Self {
        Self {
            location: FileLocation::FromProperty(property),
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn location(&self) -> &FileLocation {
        &self.location
    }

    fn resolve_path(&self, context: &LoadContext<'_>) -> Result<PathBuf, LoaderError> {
        match &self.location {
            FileLocation::Path(path) => Ok(expand_home(&path.to_string_lossy())),
            FileLocation::FromProperty(property) => match context.current_value(property) {
                Some(Value::Path(path)) => Ok(path.clone()),
                Some(Value::Text(text)) => Ok(expand_home(text)),
                Some(other) => Ok(PathBuf::from(other.to_string())),
                None => Err(LoaderError::LocationUnresolved {
                    property: property.to_string(),
                }),
            },
        }
    }
}

impl Loader for PropertiesFileLoader {
    fn kind(&self) -> &'static str {
        "properties-file"
    }

    fn label(&self) -> String {
        match &self.location {
            FileLocation::Path(path) => format!("properties-file({})", path.display()),
            FileLocation::FromProperty(property) => format!("properties-file(${{{}}})", property),
        }
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn load(&self, context: &LoadContext<'_>) -> Result<Vec<RawCandidate>, LoaderError> {
        let path = self.resolve_path(context)?;
        let location = path.display().to_string();

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoaderError::SourceNotFound {
                location: location.clone(),
            },
            _ => LoaderError::SourceUnreadable {
                location: location.clone(),
                message: e.to_string(),
            },
        })?;

        let entries = parse_properties(&content).map_err(|(line, message)| {
            LoaderError::Malformed {
                location: location.clone(),
                line,
                message,
            }
        })?;

        debug!(
            event = "core.loader.properties_file_parsed",
            path = %location,
            entries = entries.len()
        );

        let label = self.label();
        Ok(entries
            .into_iter()
            .map(|(name, value)| RawCandidate::text(name, value, &label))
            .collect())
    }
}

/// Parse properties-file text into ordered key/value pairs.
///
/// Supports `#` and `!` comments, `=`, `:` or whitespace separators,
/// trailing-backslash continuation lines and `\t \n \r \f \\ \uXXXX`
/// escapes. A key repeated later in the file replaces the earlier value.
///
/// # Errors
///
/// Returns the 1-based starting line and a message for an invalid escape.
pub fn parse_properties(content: &str) -> Result<Vec<(String, String)>, (usize, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let start_line = index + 1;
        let first = raw.trim_start();
        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let mut logical = String::from(first);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key).map_err(|message| (start_line, message))?;
        let value = unescape(raw_value).map_err(|message| (start_line, message))?;

        match positions.get(&key) {
            Some(&position) => entries[position].1 = value,
            None => {
                positions.insert(key.clone(), entries.len());
                entries.push((key, value));
            }
        }
    }
    Ok(entries)
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t']);
    }
    (key, rest)
}

fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid \\u escape '\\u{}'", hex))?;
                out.push(code);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
