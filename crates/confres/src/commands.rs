use std::path::Path;
use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, info, warn};

use confres_core::events;
use confres_core::manifest::{self, Manifest, ManifestError};
use confres_core::naming::NameIndex;
use confres_core::problems::{Problem, render_properties_sample, render_report};

use crate::table::TableFormatter;

/// Locate and parse the manifest, or explain where it was looked for.
fn load_manifest(matches: &ArgMatches) -> Result<Manifest, Box<dyn std::error::Error>> {
    let explicit = matches.get_one::<String>("manifest").map(Path::new);

    match manifest::discover(explicit) {
        Ok(Some((path, manifest))) => {
            events::log_manifest_selected(&path, &manifest);
            Ok(manifest)
        }
        Ok(None) => {
            eprintln!(
                "No manifest found.\n\
                 Tip: Pass --manifest <path>, or create ./.confres/manifest.toml or ~/.confres/manifest.toml."
            );
            warn!(event = "cli.manifest.not_found");
            Err("no manifest found".into())
        }
        Err(e) => {
            eprintln!("Failed to load manifest: {}", e);
            error!(event = "cli.manifest.load_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn report_manifest_error(e: ManifestError) -> Box<dyn std::error::Error> {
    eprintln!("Invalid manifest: {}", e);
    error!(event = "cli.manifest.invalid", error = %e);
    events::log_app_error(&e);
    e.into()
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup(matches.subcommand_name().unwrap_or("none"));

    match matches.subcommand() {
        Some(("resolve", sub_matches)) => handle_resolve_command(sub_matches),
        Some(("sample", sub_matches)) => handle_sample_command(sub_matches),
        Some(("check", sub_matches)) => handle_check_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

fn handle_resolve_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let args: Vec<String> = matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    info!(
        event = "cli.resolve_started",
        json_output = json_output,
        args = args.len()
    );

    let manifest = load_manifest(matches)?;
    let context = manifest::build(&manifest, &args)
        .map_err(report_manifest_error)?
        .into_context();

    match context.resolve() {
        Ok(snapshot) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);
            } else if snapshot.is_empty() {
                println!("No properties declared.");
            } else {
                let formatter = TableFormatter::new(&snapshot);
                println!("{}", formatter.render(&snapshot));
            }

            info!(event = "cli.resolve_completed", properties = snapshot.len());
            Ok(())
        }
        Err(e) => {
            if json_output {
                #[derive(serde::Serialize)]
                struct FailureResponse<'a> {
                    problems: &'a [Problem],
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&FailureResponse {
                        problems: e.problems()
                    })?
                );
            }
            eprintln!("{}", e);

            error!(
                event = "cli.resolve.failed",
                problems = e.problems().len()
            );

            Err(format!("configuration resolution failed ({} problems)", e.problems().len()).into())
        }
    }
}

fn handle_sample_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.sample_started");

    let manifest = load_manifest(matches)?;
    let registry = manifest::build_registry(&manifest).map_err(report_manifest_error)?;
    let options = manifest::build_options(&manifest).map_err(report_manifest_error)?;

    print!("{}", render_properties_sample(&registry, options.policy.as_ref()));

    info!(event = "cli.sample_completed", properties = registry.len());
    Ok(())
}

fn handle_check_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.check_started", json_output = json_output);

    let manifest = load_manifest(matches)?;
    let registry = manifest::build_registry(&manifest).map_err(report_manifest_error)?;
    let options = manifest::build_options(&manifest).map_err(report_manifest_error)?;
    let loaders = manifest::build_loaders(&manifest, &[]).map_err(report_manifest_error)?;

    let index = NameIndex::build(&registry, Arc::clone(&options.policy));
    let problems: Vec<Problem> = index
        .conflicts()
        .iter()
        .map(Problem::naming_conflict)
        .collect();
    let unnamed: Vec<String> = index.unnamed().iter().map(ToString::to_string).collect();

    if json_output {
        #[derive(serde::Serialize)]
        struct CheckResponse<'a> {
            properties: usize,
            loaders: Vec<String>,
            policy: &'static str,
            problems: &'a [Problem],
            unnamed: &'a [String],
        }
        let response = CheckResponse {
            properties: registry.len(),
            loaders: loaders.iter().map(|l| l.label()).collect(),
            policy: options.policy.name(),
            problems: &problems,
            unnamed: &unnamed,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!(
            "{} properties, {} loaders, naming policy '{}'",
            registry.len(),
            loaders.len(),
            options.policy.name()
        );
        for (rank, loader) in loaders.iter().enumerate() {
            println!("  {}. {}", rank + 1, loader.label());
        }
        for property in &unnamed {
            println!("Warning: property '{}' has no usable name", property);
        }
    }

    if problems.is_empty() {
        info!(event = "cli.check_completed", properties = registry.len());
        Ok(())
    } else {
        eprint!("{}", render_report(&problems));
        error!(event = "cli.check_failed", problems = problems.len());
        Err(format!("manifest check failed ({} problems)", problems.len()).into())
    }
}
