//! Turn a manifest into a registry, ranked loaders and resolver options.

use std::sync::Arc;

use tracing::debug;

use super::errors::ManifestError;
use super::types::{LoaderSpec, Manifest, PropertySpec, ValidatorSpec, toml_scalar_text};
use crate::loaders::{
    CommandLineLoader, DirectoryLoader, EnvironmentLoader, FixedValueLoader, Loader,
    PropertiesFileLoader,
};
use crate::naming::policy_by_name;
use crate::properties::{PropertyDecl, PropertyGroup, PropertyId, Registry};
use crate::resolution::{ResolutionContext, ResolverOptions};
use crate::validators::Validator;
use crate::values::ValueType;

/// Everything needed to create a [`ResolutionContext`].
pub struct BuiltManifest {
    pub registry: Registry,
    pub loaders: Vec<Box<dyn Loader>>,
    pub options: ResolverOptions,
}

impl BuiltManifest {
    pub fn into_context(self) -> ResolutionContext {
        ResolutionContext::new(self.registry, self.loaders).with_options(self.options)
    }
}

/// Build registry, loaders and options.
///
/// `args` feeds any `command-line` loader in the manifest.
pub fn build(manifest: &Manifest, args: &[String]) -> Result<BuiltManifest, ManifestError> {
    Ok(BuiltManifest {
        registry: build_registry(manifest)?,
        loaders: build_loaders(manifest, args)?,
        options: build_options(manifest)?,
    })
}

pub fn build_options(manifest: &Manifest) -> Result<ResolverOptions, ManifestError> {
    let policy = policy_by_name(&manifest.naming.policy).ok_or_else(|| {
        ManifestError::UnknownPolicy {
            policy: manifest.naming.policy.clone(),
        }
    })?;
    Ok(ResolverOptions {
        policy: Arc::from(policy),
        log_blank_candidates: manifest.naming.log_blank_candidates,
    })
}

pub fn build_registry(manifest: &Manifest) -> Result<Registry, ManifestError> {
    let mut registry = Registry::new();
    for group_spec in &manifest.groups {
        let mut group = PropertyGroup::new(group_spec.path.trim());
        if let Some(description) = &group_spec.description {
            group = group.with_description(description.clone());
        }
        for property in &group_spec.properties {
            let decl = build_decl(&group, property)?;
            registry.register(&group, decl)?;
        }
    }
    Ok(registry)
}

fn build_decl(group: &PropertyGroup, spec: &PropertySpec) -> Result<PropertyDecl, ManifestError> {
    let property = PropertyId::new(group, spec.name.trim()).to_string();
    let value_type =
        ValueType::from_name(&spec.value_type).ok_or_else(|| ManifestError::UnknownType {
            property: property.clone(),
            type_name: spec.value_type.clone(),
        })?;

    let mut builder = PropertyDecl::builder(spec.name.as_str(), value_type);
    if spec.required {
        builder = builder.required();
    }
    if spec.secret {
        builder = builder.secret();
    }
    if let Some(default) = &spec.default {
        builder = builder.default_text(toml_scalar_text(default));
    }
    if let Some(description) = &spec.description {
        builder = builder.description(description.clone());
    }
    for alias in &spec.aliases {
        builder = builder.alias(alias.name.clone(), alias.usage);
    }
    for validator in &spec.validators {
        builder = builder.validator(build_validator(&property, validator)?);
    }
    Ok(builder.build()?)
}

fn build_validator(property: &str, spec: &ValidatorSpec) -> Result<Validator, ManifestError> {
    Ok(match spec {
        ValidatorSpec::NotNull => Validator::NotNull,
        ValidatorSpec::AtLeast { value } => Validator::AtLeast(*value),
        ValidatorSpec::LessThan { value } => Validator::LessThan(*value),
        ValidatorSpec::MatchesRegex { pattern } => {
            Validator::matches_regex(pattern).map_err(|e| ManifestError::InvalidRegex {
                property: property.to_string(),
                pattern: pattern.clone(),
                message: e.to_string(),
            })?
        }
        ValidatorSpec::StartsWith { value } => Validator::StartsWith(value.clone()),
        ValidatorSpec::EndsWith { value } => Validator::EndsWith(value.clone()),
        ValidatorSpec::OneOf { values } => Validator::OneOf(values.clone()),
        ValidatorSpec::MinLength { value } => Validator::MinLength(*value),
        ValidatorSpec::AllowEmpty => Validator::AllowEmpty,
    })
}

pub fn build_loaders(
    manifest: &Manifest,
    args: &[String],
) -> Result<Vec<Box<dyn Loader>>, ManifestError> {
    let mut loaders: Vec<Box<dyn Loader>> = Vec::with_capacity(manifest.loaders.len());
    for (i, spec) in manifest.loaders.iter().enumerate() {
        let position = i + 1;
        let loader: Box<dyn Loader> = match spec {
            LoaderSpec::Fixed { label, values } => {
                let mut loader = FixedValueLoader::new(
                    values
                        .iter()
                        .map(|(name, value)| (name.clone(), toml_scalar_text(value))),
                );
                if let Some(label) = label {
                    loader = loader.named(label.clone());
                }
                Box::new(loader)
            }
            LoaderSpec::CommandLine => Box::new(CommandLineLoader::new(args.iter().cloned())),
            LoaderSpec::Environment { prefix } => {
                let loader = EnvironmentLoader::from_process();
                Box::new(match prefix {
                    Some(prefix) => loader.with_prefix(prefix.clone()),
                    None => loader,
                })
            }
            LoaderSpec::PropertiesFile {
                path,
                path_property,
                required,
            } => {
                let loader = match (path, path_property) {
                    (Some(path), None) => PropertiesFileLoader::new(path.clone()),
                    (None, Some(property)) => {
                        PropertiesFileLoader::from_property(PropertyId::from(property.trim()))
                    }
                    _ => {
                        return Err(ManifestError::InvalidLoader {
                            position,
                            message: "properties-file needs exactly one of 'path' or 'path_property'"
                                .to_string(),
                        });
                    }
                };
                Box::new(loader.required(*required))
            }
            LoaderSpec::Directory {
                root,
                context,
                required,
            } => {
                let mut loader = DirectoryLoader::new(root.clone()).required(*required);
                if let Some(context) = context {
                    loader = loader.with_context(context.clone());
                }
                Box::new(loader)
            }
        };
        debug!(
            event = "core.manifest.loader_built",
            position = position,
            loader = %loader.label()
        );
        loaders.push(loader);
    }
    Ok(loaders)
}
