//! Configuration types

use serde::{Deserialize, Serialize};

/// Main configuration for Launchpad
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace layout
    pub workspace: WorkspaceConfig,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Registry configuration
    pub registry: RegistryConfig,

    /// Publishing configuration
    pub publish: PublishConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Workspace layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// File whose presence marks a monorepo
    pub marker_file: String,

    /// Reserved top-level directory holding the workspace packages
    pub packages_dir: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            marker_file: "lerna.json".to_string(),
            packages_dir: "packages".to_string(),
        }
    }
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Prefix applied to every version before comparison (e.g. "v")
    pub tag_prefix: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            tag_prefix: "v".to_string(),
        }
    }
}

impl VersioningConfig {
    /// Apply the configured prefix, leaving already prefixed versions alone
    pub fn prefix(&self, version: &str) -> String {
        if self.tag_prefix.is_empty() || version.starts_with(&self.tag_prefix) {
            version.to_string()
        } else {
            format!("{}{}", self.tag_prefix, version)
        }
    }
}

/// What to do when the registry has never seen a package
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnpublishedPolicy {
    /// Fail the lookup
    #[default]
    Error,
    /// Ignore the registry and keep the local version
    Baseline,
}

/// Registry configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Custom registry URL
    pub url: Option<String>,

    /// Policy for packages that were never published
    pub on_unpublished: UnpublishedPolicy,
}

/// Publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Remote to push the release to
    pub remote: String,

    /// Branch to push (defaults to the current branch)
    pub branch: Option<String>,

    /// Marker appended to release commit messages so CI skips them
    pub skip_ci_marker: String,

    /// Log release commands instead of running them
    pub dry_run: bool,

    /// Command used to invoke lerna
    pub lerna_command: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: None,
            skip_ci_marker: "[skip ci]".to_string(),
            dry_run: false,
            lerna_command: "npx lerna".to_string(),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Maximum number of concurrent changed-file queries
    pub concurrency: usize,

    /// Indentation for lines nested under a package header
    pub indent: String,
}

/// Default bound on concurrent changed-file queries: the available parallelism, or 4
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            indent: "  ".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        let versioning = VersioningConfig::default();
        assert_eq!(versioning.prefix("1.2.3"), "v1.2.3");
        assert_eq!(versioning.prefix("v1.2.3"), "v1.2.3");

        let bare = VersioningConfig {
            tag_prefix: String::new(),
        };
        assert_eq!(bare.prefix("1.2.3"), "1.2.3");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[publish]\nremote = \"upstream\"\n").unwrap();
        assert_eq!(config.publish.remote, "upstream");
        assert_eq!(config.publish.skip_ci_marker, "[skip ci]");
        assert_eq!(config.workspace.packages_dir, "packages");
        assert_eq!(config.registry.on_unpublished, UnpublishedPolicy::Error);
    }

    #[test]
    fn test_unpublished_policy_yaml() {
        let config: Config = serde_yaml::from_str("registry:\n  on_unpublished: baseline\n").unwrap();
        assert_eq!(config.registry.on_unpublished, UnpublishedPolicy::Baseline);
    }
}
