use confres_core::init_logging;

mod app;
mod commands;
mod table;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Extract verbosity flags before initializing logging
    let quiet = matches.get_flag("quiet");
    let verbose = matches.get_flag("verbose");
    init_logging(quiet, verbose);

    commands::run_command(&matches)?;

    Ok(())
}
