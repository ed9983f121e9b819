//! Manifest document types, deserialized from TOML.
//!
//! # Example Manifest
//!
//! ```toml
//! [naming]
//! policy = "relaxed"
//!
//! [[loaders]]
//! kind = "command-line"
//!
//! [[loaders]]
//! kind = "environment"
//! prefix = "APP_"
//!
//! [[loaders]]
//! kind = "properties-file"
//! path_property = "CONFIG_FILE"
//! required = true
//!
//! [[groups]]
//! path = ""
//!
//! [[groups.properties]]
//! name = "CONFIG_FILE"
//! type = "path"
//! default = "~/.app/app.properties"
//!
//! [[groups]]
//! path = "server"
//! description = "HTTP listener"
//!
//! [[groups.properties]]
//! name = "port"
//! type = "integer"
//! default = 8080
//! aliases = [{ name = "PORT", usage = "input" }]
//! validators = [{ rule = "at-least", value = 1 }, { rule = "less-than", value = 65536 }]
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::properties::AliasUsage;

/// Top-level manifest: naming policy, ranked loaders and property groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub naming: NamingSection,

    /// Loaders in rank order, highest precedence first.
    #[serde(default)]
    pub loaders: Vec<LoaderSpec>,

    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingSection {
    #[serde(default = "default_policy")]
    pub policy: String,

    #[serde(default)]
    pub log_blank_candidates: bool,
}

impl Default for NamingSection {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            log_blank_candidates: false,
        }
    }
}

fn default_policy() -> String {
    "uppercase".to_string()
}

/// One loader entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LoaderSpec {
    Fixed {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        values: BTreeMap<String, toml::Value>,
    },
    CommandLine,
    Environment {
        #[serde(default)]
        prefix: Option<String>,
    },
    PropertiesFile {
        #[serde(default)]
        path: Option<PathBuf>,
        /// Take the file path from this property instead of `path`.
        #[serde(default)]
        path_property: Option<String>,
        #[serde(default)]
        required: bool,
    },
    Directory {
        root: PathBuf,
        #[serde(default)]
        context: Option<String>,
        #[serde(default)]
        required: bool,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Dotted group path; empty for the root group.
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub properties: Vec<PropertySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,

    #[serde(rename = "type", default = "default_type")]
    pub value_type: String,

    /// Default in TOML form; converted with the property's own type.
    #[serde(default)]
    pub default: Option<toml::Value>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub secret: bool,

    #[serde(default)]
    pub aliases: Vec<AliasSpec>,

    #[serde(default)]
    pub validators: Vec<ValidatorSpec>,
}

fn default_type() -> String {
    "string".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasSpec {
    pub name: String,

    #[serde(default = "default_usage")]
    pub usage: AliasUsage,
}

fn default_usage() -> AliasUsage {
    AliasUsage::Both
}

/// Validator entry, tagged by `rule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum ValidatorSpec {
    NotNull,
    AtLeast { value: f64 },
    LessThan { value: f64 },
    MatchesRegex { pattern: String },
    StartsWith { value: String },
    EndsWith { value: String },
    OneOf { values: Vec<String> },
    MinLength { value: usize },
    AllowEmpty,
}

/// Text form of a TOML scalar, as a loader would have supplied it.
pub(crate) fn toml_scalar_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
