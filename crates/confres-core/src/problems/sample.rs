//! Properties-file sample generated from the registry.
//!
//! Operators use it to fill in missing required values; it is appended to
//! every failure report and printed by `confres sample`.

use crate::naming::{MatchingPolicy, effective_names};
use crate::properties::Registry;

/// Render a commented properties file covering every named property.
///
/// Required properties without a default are written as active `key=` lines;
/// everything else is commented out with its default.
pub fn render_properties_sample(registry: &Registry, policy: &dyn MatchingPolicy) -> String {
    let mut out = String::from("# Expected properties file format (key=value)\n");
    let mut current_group: Option<&str> = None;

    for property in registry.iter() {
        let Some(names) = effective_names(property, policy) else {
            continue;
        };
        let decl = &property.decl;

        if current_group != Some(property.group.path()) {
            current_group = Some(property.group.path());
            if !property.group.is_root() {
                out.push_str(&format!("\n# [{}]", property.group.path()));
                if let Some(description) = property.group.description() {
                    out.push_str(&format!(" {}", description));
                }
                out.push('\n');
            }
        }

        out.push('\n');
        if let Some(description) = decl.description() {
            for line in description.lines() {
                out.push_str(&format!("# {}\n", line));
            }
        }

        let mut facts = vec![format!("type: {}", decl.value_type().name())];
        let default = match decl.default_value() {
            Some(_) if decl.is_secret() => None,
            Some(value) => Some(decl.value_type().format(value)),
            None => None,
        };
        if let Some(default) = &default {
            facts.push(format!("default: {}", default));
        }
        if decl.is_required() {
            facts.push("REQUIRED".to_string());
        }
        for validator in decl.validators() {
            facts.push(format!("{:?}", validator));
        }
        out.push_str(&format!("# {}\n", facts.join(", ")));

        let mut outputs = names.output_names().map(|n| n.actual.as_str());
        let key = outputs.next().unwrap_or(names.canonical().actual.as_str());
        let others: Vec<&str> = outputs.collect();
        if !others.is_empty() {
            out.push_str(&format!("# also written as: {}\n", others.join(", ")));
        }

        if decl.is_required() && decl.default_value().is_none() {
            out.push_str(&format!("{}=\n", key));
        } else {
            out.push_str(&format!("#{}={}\n", key, default.unwrap_or_default()));
        }
    }
    out
}
