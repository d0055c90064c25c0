//! Repository mode detection and workspace enumeration

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use launchpad_core::error::{ConfigError, Result};
use launchpad_core::traits::ManifestReader;
use launchpad_core::types::{Manifest, Package, RepositoryMode, WorkspaceMarker};

use crate::manifest::{load_manifest, load_marker, MANIFEST_FILE};

/// Detect the repository mode from the presence of the marker file
pub fn detect_mode(root: &Path, marker_file: &str) -> RepositoryMode {
    if root.join(marker_file).is_file() {
        RepositoryMode::Workspace
    } else {
        RepositoryMode::Single
    }
}

/// Reads npm manifests below a repository root
#[derive(Debug, Clone)]
pub struct NpmManifestReader {
    root: PathBuf,
    marker_file: String,
}

impl NpmManifestReader {
    /// Create a reader for `root` using `marker_file` as the workspace marker
    pub fn new(root: impl Into<PathBuf>, marker_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            marker_file: marker_file.into(),
        }
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mode of the repository this reader points at
    pub fn mode(&self) -> RepositoryMode {
        detect_mode(&self.root, &self.marker_file)
    }

    /// Directories matched by the marker's package globs, in glob order
    fn package_dirs(&self, marker: &WorkspaceMarker) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();

        for pattern in &marker.packages {
            let full = self.root.join(pattern);
            let entries =
                glob::glob(&full.to_string_lossy()).map_err(|e| ConfigError::InvalidValue {
                    field: "packages".to_string(),
                    message: format!("invalid glob '{}': {}", pattern, e),
                })?;

            for entry in entries.flatten() {
                if entry.is_dir() && !dirs.contains(&entry) {
                    dirs.push(entry);
                }
            }
        }

        Ok(dirs)
    }
}

#[async_trait]
impl ManifestReader for NpmManifestReader {
    async fn root_manifest(&self) -> Result<Option<Manifest>> {
        load_manifest(&self.root.join(MANIFEST_FILE)).await
    }

    async fn workspace_marker(&self) -> Result<WorkspaceMarker> {
        load_marker(&self.root.join(&self.marker_file)).await
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn workspace_packages(&self) -> Result<Vec<Package>> {
        let marker = self.workspace_marker().await?;
        let mut packages = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for dir in self.package_dirs(&marker)? {
            let manifest_path = dir.join(MANIFEST_FILE);
            let Some(manifest) = load_manifest(&manifest_path).await? else {
                debug!(dir = %dir.display(), "no manifest, skipping directory");
                continue;
            };

            if manifest.name.is_empty() {
                warn!(path = %manifest_path.display(), "package manifest has no name, skipping");
                continue;
            }

            if let Some(first) = seen.get(&manifest.name) {
                return Err(ConfigError::InvalidValue {
                    field: "name".to_string(),
                    message: format!(
                        "package '{}' is declared by both {} and {}",
                        manifest.name,
                        first.display(),
                        dir.display()
                    ),
                }
                .into());
            }
            seen.insert(manifest.name.clone(), dir.clone());

            packages.push(
                Package::new(manifest.name, manifest.version, dir).with_private(manifest.private),
            );
        }

        info!(count = packages.len(), "enumerated workspace packages");
        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::error::LaunchpadError;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_detect_mode() {
        let temp = TempDir::new().unwrap();
        assert_eq!(detect_mode(temp.path(), "lerna.json"), RepositoryMode::Single);

        write(temp.path(), "lerna.json", r#"{"version": "1.0.0"}"#);
        assert_eq!(
            detect_mode(temp.path(), "lerna.json"),
            RepositoryMode::Workspace
        );
    }

    #[tokio::test]
    async fn test_workspace_packages() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "lerna.json", r#"{"version": "1.0.0"}"#);
        write(
            temp.path(),
            "packages/foo/package.json",
            r#"{"name": "foo", "version": "1.2.0"}"#,
        );
        write(
            temp.path(),
            "packages/internal/package.json",
            r#"{"name": "internal", "version": "9.0.0", "private": true}"#,
        );
        write(temp.path(), "packages/docs/README.md", "no manifest here");

        let reader = NpmManifestReader::new(temp.path(), "lerna.json");
        let mut packages = reader.workspace_packages().await.unwrap();
        packages.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "foo");
        assert!(!packages[0].private);
        assert_eq!(packages[1].name, "internal");
        assert!(packages[1].private);
    }

    #[tokio::test]
    async fn test_scoped_glob() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "lerna.json",
            r#"{"version": "1.0.0", "packages": ["packages/*", "packages/@acme/*"]}"#,
        );
        write(
            temp.path(),
            "packages/@acme/ui/package.json",
            r#"{"name": "@acme/ui", "version": "0.3.0"}"#,
        );

        let reader = NpmManifestReader::new(temp.path(), "lerna.json");
        let packages = reader.workspace_packages().await.unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "@acme/ui");
    }

    #[tokio::test]
    async fn test_duplicate_names_rejected() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "lerna.json", r#"{"version": "1.0.0"}"#);
        write(temp.path(), "packages/a/package.json", r#"{"name": "dup"}"#);
        write(temp.path(), "packages/b/package.json", r#"{"name": "dup"}"#);

        let reader = NpmManifestReader::new(temp.path(), "lerna.json");
        let err = reader.workspace_packages().await.unwrap_err();
        assert!(matches!(
            err,
            LaunchpadError::Config(ConfigError::InvalidValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_root_manifest_absent() {
        let temp = TempDir::new().unwrap();
        let reader = NpmManifestReader::new(temp.path(), "lerna.json");
        assert!(reader.root_manifest().await.unwrap().is_none());
        assert_eq!(reader.mode(), RepositoryMode::Single);
    }
}
