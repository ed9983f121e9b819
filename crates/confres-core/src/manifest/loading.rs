//! Manifest discovery and parsing.
//!
//! # Manifest Hierarchy
//!
//! The first manifest found wins; manifests are not merged.
//! 1. **Explicit path** - `--manifest <path>` (must exist)
//! 2. **Project manifest** - `./.confres/manifest.toml`
//! 3. **User manifest** - `~/.confres/manifest.toml`

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::errors::ManifestError;
use super::types::Manifest;

const MANIFEST_DIR: &str = ".confres";
const MANIFEST_FILE: &str = "manifest.toml";

/// Parse manifest text. `origin` names the document in error messages.
pub fn parse_manifest(text: &str, origin: &str) -> Result<Manifest, ManifestError> {
    toml::from_str(text).map_err(|e| ManifestError::ParseFailed {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

/// Read and parse one manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let shown = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManifestError::NotFound {
            path: shown.clone(),
        },
        _ => ManifestError::ReadFailed {
            path: shown.clone(),
            message: e.to_string(),
        },
    })?;
    let manifest = parse_manifest(&text, &shown)?;
    debug!(
        event = "core.manifest.load_completed",
        path = %shown,
        loaders = manifest.loaders.len(),
        groups = manifest.groups.len()
    );
    Ok(manifest)
}

pub fn project_manifest_path(cwd: &Path) -> PathBuf {
    cwd.join(MANIFEST_DIR).join(MANIFEST_FILE)
}

pub fn user_manifest_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(MANIFEST_DIR).join(MANIFEST_FILE))
}

/// Find the manifest to use, following the hierarchy.
///
/// # Errors
///
/// An explicit path that does not exist is an error. Missing files in the
/// project and user locations are skipped; a file that exists but cannot be
/// read or parsed is an error.
pub fn discover(explicit: Option<&Path>) -> Result<Option<(PathBuf, Manifest)>, ManifestError> {
    let cwd = std::env::current_dir().map_err(|e| ManifestError::ReadFailed {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    discover_in(explicit, &cwd, user_manifest_path().as_deref())
}

/// [`discover`] with the project and user locations supplied by the caller.
pub fn discover_in(
    explicit: Option<&Path>,
    cwd: &Path,
    user_manifest: Option<&Path>,
) -> Result<Option<(PathBuf, Manifest)>, ManifestError> {
    if let Some(path) = explicit {
        let manifest = load_manifest(path)?;
        info!(event = "core.manifest.selected", path = %path.display(), origin = "explicit");
        return Ok(Some((path.to_path_buf(), manifest)));
    }

    let candidates = [
        ("project", Some(project_manifest_path(cwd))),
        ("user", user_manifest.map(Path::to_path_buf)),
    ];
    for (origin, path) in candidates {
        let Some(path) = path else {
            continue;
        };
        match load_manifest(&path) {
            Ok(manifest) => {
                info!(event = "core.manifest.selected", path = %path.display(), origin = origin);
                return Ok(Some((path, manifest)));
            }
            Err(ManifestError::NotFound { .. }) => {
                debug!(event = "core.manifest.not_found", path = %path.display(), origin = origin);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
