use clap::{Arg, ArgAction, Command};

fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .long("manifest")
        .short('m')
        .value_name("PATH")
        .help("Manifest file (default: ./.confres/manifest.toml, then ~/.confres/manifest.toml)")
}

pub fn build_cli() -> Command {
    Command::new("confres")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve declared configuration from ranked sources, failing fast with every problem")
        .long_about("confres reads a manifest of property declarations and ranked loaders, resolves every property once, and prints the resulting values. When anything is wrong it reports every problem at once, together with a sample properties file to fill in.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("resolve")
                .about("Resolve all properties and print their values")
                .arg(manifest_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("args")
                        .help("Arguments for command-line loaders (after --)")
                        .num_args(0..)
                        .last(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Print a sample properties file for the declared properties")
                .arg(manifest_arg()),
        )
        .subcommand(
            Command::new("check")
                .about("Validate the manifest and report naming conflicts without loading values")
                .arg(manifest_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}
