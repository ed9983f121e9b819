//! The resolution pipeline: names, loaders, conversion, validation, defaults.

use std::collections::{HashMap, HashSet};

use tracing::{debug, error, info, trace, warn};

use super::context::ResolverOptions;
use super::errors::ResolutionError;
use super::snapshot::{ResolvedValue, ValueOrigin, ValueSnapshot};
use crate::loaders::{LoadContext, Loader, RawCandidate, RawValue};
use crate::naming::NameIndex;
use crate::problems::{Problem, ProblemCollector, render_properties_sample};
use crate::properties::{PropertyDecl, PropertyId, Registry};
use crate::validators::run_validators;
use crate::values::Value;

/// Outcome of offering one raw candidate to its property.
enum Outcome {
    Accepted(Value),
    /// Blank, or bare for a non-flag type: no value supplied.
    Absent,
    /// Conversion or validation failed; problems were recorded.
    Rejected,
}

/// Run one full resolution pass.
///
/// Problems never stop the pass; they are collected and returned together.
/// Either every property gets an entry in the snapshot or no snapshot is
/// produced at all.
pub fn resolve(
    registry: &Registry,
    loaders: &[Box<dyn Loader>],
    options: &ResolverOptions,
) -> Result<ValueSnapshot, ResolutionError> {
    info!(
        event = "core.resolution.started",
        properties = registry.len(),
        loaders = loaders.len(),
        policy = options.policy.name()
    );

    let index = NameIndex::build(registry, options.policy.clone());
    let mut problems = ProblemCollector::new();

    // Properties that must not receive any further candidate or a
    // missing-value problem: naming conflicts and failed candidates.
    let mut settled: HashSet<PropertyId> = HashSet::new();
    for conflict in index.conflicts() {
        problems.record(Problem::naming_conflict(conflict));
        settled.extend(conflict.claimants.iter().map(|(id, _)| id.clone()));
    }

    let mut resolved: HashMap<PropertyId, Value> = HashMap::new();
    let mut origins: HashMap<PropertyId, String> = HashMap::new();

    for loader in loaders {
        let label = loader.label();
        debug!(event = "core.loader.load_started", loader = %label);

        let loaded = {
            let context = LoadContext::new(registry, &index, &resolved);
            loader.load(&context)
        };
        let candidates = match loaded {
            Ok(candidates) => candidates,
            Err(e) if loader.is_required() => {
                problems.record(Problem::loader_access_failure(&label, &e.to_string()));
                continue;
            }
            Err(e) => {
                warn!(
                    event = "core.loader.source_unavailable",
                    loader = %label,
                    error = %e,
                    "Optional source skipped"
                );
                continue;
            }
        };

        let total = candidates.len();
        let mut accepted = 0usize;
        for candidate in candidates {
            let Some(id) = index.lookup(&candidate.name).cloned() else {
                trace!(
                    event = "core.resolution.candidate_unmatched",
                    name = %candidate.name,
                    source = %candidate.source
                );
                continue;
            };
            if resolved.contains_key(&id) || settled.contains(&id) {
                trace!(
                    event = "core.resolution.candidate_shadowed",
                    property = %id,
                    source = %candidate.source
                );
                continue;
            }
            let Some(property) = registry.get(&id) else {
                continue;
            };

            match offer_candidate(&id, &property.decl, &candidate, options, &mut problems) {
                Outcome::Accepted(value) => {
                    debug!(
                        event = "core.resolution.value_accepted",
                        property = %id,
                        name = %candidate.name,
                        source = %candidate.source
                    );
                    resolved.insert(id.clone(), value);
                    origins.insert(id, candidate.source);
                    accepted += 1;
                }
                Outcome::Rejected => {
                    settled.insert(id);
                }
                Outcome::Absent => {}
            }
        }

        debug!(
            event = "core.loader.load_completed",
            loader = %label,
            candidates = total,
            accepted = accepted
        );
    }

    let mut entries = Vec::with_capacity(registry.len());
    for property in registry.iter() {
        let id = &property.id;
        let decl = &property.decl;

        if let Some(value) = resolved.remove(id) {
            let origin = origins.remove(id).unwrap_or_default();
            entries.push((id.clone(), entry(Some(value), ValueOrigin::Loader(origin), decl)));
            continue;
        }
        if settled.contains(id) {
            continue;
        }
        if let Some(default) = decl.default_value() {
            entries.push((id.clone(), entry(Some(default.clone()), ValueOrigin::Default, decl)));
            continue;
        }
        if decl.is_required() {
            let accepted_names: Vec<String> = index
                .names_of(id)
                .map(|names| names.input_names().map(|n| n.actual.clone()).collect())
                .unwrap_or_default();
            problems.record(Problem::missing_required(id, &accepted_names));
            continue;
        }

        let failures = run_validators(decl.validators(), None);
        if failures.is_empty() {
            entries.push((id.clone(), entry(None, ValueOrigin::Unset, decl)));
        }
        for failure in &failures {
            problems.record(Problem::validation_failure(
                id,
                None,
                None,
                failure,
                decl.is_secret(),
            ));
        }
    }

    if !problems.is_empty() {
        error!(
            event = "core.resolution.failed",
            problems = problems.len()
        );
        let sample = render_properties_sample(registry, options.policy.as_ref());
        return Err(ResolutionError::new(problems.into_problems(), Some(sample)));
    }

    let snapshot = ValueSnapshot::from_entries(entries);
    info!(
        event = "core.resolution.completed",
        properties = snapshot.len()
    );
    Ok(snapshot)
}

/// Convert and validate one candidate, recording problems on failure.
fn offer_candidate(
    id: &PropertyId,
    decl: &PropertyDecl,
    candidate: &RawCandidate,
    options: &ResolverOptions,
    problems: &mut ProblemCollector,
) -> Outcome {
    let parsed = match &candidate.value {
        RawValue::Bare if decl.value_type().is_flag() => Ok(Value::Flag(true)),
        RawValue::Text(text) if !candidate.value.is_blank() || decl.permits_empty() => {
            decl.value_type().parse(text)
        }
        _ => {
            if options.log_blank_candidates {
                debug!(
                    event = "core.resolution.blank_candidate",
                    property = %id,
                    source = %candidate.source
                );
            }
            return Outcome::Absent;
        }
    };

    let value = match parsed {
        Ok(value) => value,
        Err(e) => {
            problems.record(Problem::conversion_failure(
                id,
                &candidate.name,
                &candidate.source,
                &e,
                decl.is_secret(),
            ));
            return Outcome::Rejected;
        }
    };

    let failures = run_validators(decl.validators(), Some(&value));
    if failures.is_empty() {
        return Outcome::Accepted(value);
    }
    for failure in &failures {
        problems.record(Problem::validation_failure(
            id,
            Some(&candidate.name),
            Some(&candidate.source),
            failure,
            decl.is_secret(),
        ));
    }
    Outcome::Rejected
}

fn entry(value: Option<Value>, origin: ValueOrigin, decl: &PropertyDecl) -> ResolvedValue {
    ResolvedValue {
        value,
        origin,
        secret: decl.is_secret(),
    }
}
