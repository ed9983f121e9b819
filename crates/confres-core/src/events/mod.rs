//! Lifecycle events shared by the library and the CLI.

use std::path::Path;

use tracing::{error, info};

use crate::errors::ConfresError;
use crate::manifest::Manifest;

pub fn log_app_startup(command: &str) {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        command = command
    );
}

/// The manifest chosen for this run and the size of what it declares.
pub fn log_manifest_selected(path: &Path, manifest: &Manifest) {
    let properties: usize = manifest.groups.iter().map(|g| g.properties.len()).sum();
    info!(
        event = "core.app.manifest_selected",
        path = %path.display(),
        groups = manifest.groups.len(),
        properties = properties,
        loaders = manifest.loaders.len()
    );
}

pub fn log_app_error(error: &dyn ConfresError) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        code = error.error_code(),
        user_error = error.is_user_error()
    );
}
