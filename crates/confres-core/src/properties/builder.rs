//! Builder for [`PropertyDecl`].

use crate::properties::errors::DeclarationError;
use crate::properties::types::{Alias, AliasUsage, PropertyDecl};
use crate::validators::{Validator, run_validators};
use crate::values::{Value, ValueType};

enum DefaultSpec {
    Typed(Value),
    Text(String),
}

pub struct PropertyBuilder {
    identity: String,
    value_type: ValueType,
    default: Option<DefaultSpec>,
    required: bool,
    aliases: Vec<Alias>,
    validators: Vec<Validator>,
    description: Option<String>,
    secret: bool,
}

impl PropertyDecl {
    pub fn builder(identity: impl Into<String>, value_type: ValueType) -> PropertyBuilder {
        PropertyBuilder {
            identity: identity.into(),
            value_type,
            default: None,
            required: false,
            aliases: Vec::new(),
            validators: Vec::new(),
            description: None,
            secret: false,
        }
    }

    pub fn string(identity: impl Into<String>) -> PropertyBuilder {
        Self::builder(identity, ValueType::string())
    }

    pub fn integer(identity: impl Into<String>) -> PropertyBuilder {
        Self::builder(identity, ValueType::integer())
    }

    pub fn flag(identity: impl Into<String>) -> PropertyBuilder {
        Self::builder(identity, ValueType::flag())
    }

    pub fn float(identity: impl Into<String>) -> PropertyBuilder {
        Self::builder(identity, ValueType::float())
    }

    pub fn duration(identity: impl Into<String>) -> PropertyBuilder {
        Self::builder(identity, ValueType::duration())
    }

    pub fn path(identity: impl Into<String>) -> PropertyBuilder {
        Self::builder(identity, ValueType::path())
    }
}

impl PropertyBuilder {
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Typed default. Must match the property's value type.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultSpec::Typed(value.into()));
        self
    }

    /// Default given as text, converted with the property's value type.
    pub fn default_text(mut self, text: impl Into<String>) -> Self {
        self.default = Some(DefaultSpec::Text(text.into()));
        self
    }

    pub fn alias(mut self, name: impl Into<String>, usage: AliasUsage) -> Self {
        self.aliases.push(Alias::new(name, usage));
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Keep the value out of tables, JSON output and debug formatting.
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn build(self) -> Result<PropertyDecl, DeclarationError> {
        let identity = self.identity.trim().to_string();
        if identity.is_empty() {
            return Err(DeclarationError::BlankIdentity);
        }

        if self.aliases.iter().any(|alias| alias.name.trim().is_empty()) {
            return Err(DeclarationError::BlankAlias { property: identity });
        }

        let kind = self.value_type.kind();
        if let Some(validator) = self
            .validators
            .iter()
            .find(|validator| !validator.is_compatible_with(kind))
        {
            return Err(DeclarationError::IncompatibleValidator {
                property: identity,
                value_type: self.value_type.name().to_string(),
                rule: validator.rule().to_string(),
            });
        }

        let default = match self.default {
            None => None,
            Some(DefaultSpec::Typed(value)) => {
                if !kind.accepts(&value) {
                    return Err(DeclarationError::InvalidDefault {
                        property: identity,
                        message: format!(
                            "expected a {} value, got {}",
                            self.value_type.name(),
                            value.type_name()
                        ),
                    });
                }
                Some(value)
            }
            Some(DefaultSpec::Text(text)) => {
                let value = self.value_type.parse(&text).map_err(|e| {
                    DeclarationError::InvalidDefault {
                        property: identity.clone(),
                        message: e.to_string(),
                    }
                })?;
                Some(value)
            }
        };

        if let Some(value) = &default
            && let Some(failure) = run_validators(&self.validators, Some(value))
                .into_iter()
                .next()
        {
            return Err(DeclarationError::DefaultFailsValidation {
                property: identity,
                rule: failure.rule,
                message: failure.message,
            });
        }

        Ok(PropertyDecl {
            identity,
            value_type: self.value_type,
            default,
            required: self.required,
            aliases: self.aliases,
            validators: self.validators,
            description: self.description,
            secret: self.secret,
        })
    }
}
