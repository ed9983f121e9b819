//! Directory loader: one file per property.
//!
//! A file at `<root>/<context>/server/port` supplies `server.port`; path
//! components below the root are joined with `.`. This is the layout used
//! by mounted secret volumes and container config maps.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::loaders::errors::LoaderError;
use crate::loaders::traits::Loader;
use crate::loaders::types::{LoadContext, RawCandidate};
use crate::values::parsing::expand_home;

#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
    context: Option<String>,
    required: bool,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            context: None,
            required: false,
        }
    }

    /// Read from `<root>/<context>` instead of the root itself.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = (!context.trim().is_empty()).then_some(context);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    fn base_dir(&self) -> PathBuf {
        let root = expand_home(&self.root.to_string_lossy());
        match &self.context {
            Some(context) => root.join(context),
            None => root,
        }
    }
}

impl Loader for DirectoryLoader {
    fn kind(&self) -> &'static str {
        "directory"
    }

    fn label(&self) -> String {
        format!("directory({})", self.base_dir().display())
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn load(&self, context: &LoadContext<'_>) -> Result<Vec<RawCandidate>, LoaderError> {
        let base = self.base_dir();
        let location = base.display().to_string();

        match fs::metadata(&base) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(LoaderError::SourceUnreadable {
                    location,
                    message: "not a directory".to_string(),
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoaderError::SourceNotFound { location });
            }
            Err(e) => {
                return Err(LoaderError::SourceUnreadable {
                    location,
                    message: e.to_string(),
                });
            }
        }

        let label = self.label();
        let mut candidates = Vec::new();
        let mut skipped = 0usize;

        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| LoaderError::SourceUnreadable {
                location: location.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = property_name(&base, entry.path()) else {
                skipped += 1;
                continue;
            };
            if !context.is_known(&name) {
                skipped += 1;
                continue;
            }

            let content =
                fs::read_to_string(entry.path()).map_err(|e| LoaderError::SourceUnreadable {
                    location: entry.path().display().to_string(),
                    message: e.to_string(),
                })?;
            let value = content.trim_end_matches(['\r', '\n']);
            candidates.push(RawCandidate::text(name, value, &label));
        }

        debug!(
            event = "core.loader.directory_scanned",
            path = %location,
            matched = candidates.len(),
            skipped = skipped
        );

        Ok(candidates)
    }
}

/// Property name for a file below `base`, or `None` for hidden entries.
fn property_name(base: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(base).ok()?;
    let mut segments = Vec::new();
    for component in relative.components() {
        let segment = component.as_os_str().to_str()?;
        if segment.starts_with('.') {
            return None;
        }
        segments.push(segment);
    }
    (!segments.is_empty()).then(|| segments.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::test_support::with_context;
    use crate::loaders::types::RawValue;
    use crate::naming::{NameIndex, UppercasePolicy};
    use crate::properties::{PropertyDecl, PropertyGroup, Registry};
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn test_reads_files_as_properties() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TIMEOUT"), "60\n").unwrap();
        fs::write(dir.path().join("unrelated"), "x").unwrap();

        let loader = DirectoryLoader::new(dir.path());
        let candidates = with_context(&["TIMEOUT"], |ctx| loader.load(ctx).unwrap());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "TIMEOUT");
        assert_eq!(candidates[0].value, RawValue::Text("60".to_string()));
    }

    #[test]
    fn test_nested_files_use_group_paths() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("prod").join("server");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("port"), "8080\r\n").unwrap();

        let registry = Registry::from_pairs([(
            PropertyDecl::integer("port").build().unwrap(),
            PropertyGroup::new("server"),
        )])
        .unwrap();
        let index = NameIndex::build(&registry, Arc::new(UppercasePolicy));
        let resolved = HashMap::new();
        let context = LoadContext::new(&registry, &index, &resolved);

        let loader = DirectoryLoader::new(dir.path()).with_context("prod");
        let candidates = loader.load(&context).unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "server.port");
        assert_eq!(candidates[0].value, RawValue::Text("8080".to_string()));
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".TIMEOUT"), "1").unwrap();

        let loader = DirectoryLoader::new(dir.path());
        let candidates = with_context(&["TIMEOUT", ".TIMEOUT"], |ctx| loader.load(ctx).unwrap());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirectoryLoader::new(dir.path().join("absent"));

        let err = with_context(&[], |ctx| loader.load(ctx).unwrap_err());
        assert!(matches!(err, LoaderError::SourceNotFound { .. }));
    }

    #[test]
    fn test_blank_context_ignored() {
        let loader = DirectoryLoader::new("/run/config").with_context("  ");
        assert_eq!(loader.label(), "directory(/run/config)");
    }
}
