//! Extension points - named callbacks the release tool invokes
//!
//! A plugin declares which points it taps and implements the matching
//! methods of [`ReleasePlugin`]. The registry calls plugins in
//! registration order:
//! - query points (author, previous version, repository, changelog lines)
//!   stop at the first plugin that returns a value
//! - `publish` runs every tapping plugin and stops at the first error

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::traits::NormalizeFn;
use crate::types::{Author, ChangelogCommit, RepositoryInfo};

/// Renders one changelog line for a commit
pub type LineRenderFn = dyn Fn(&ChangelogCommit) -> String + Send + Sync;

/// Named extension points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Who authored the package
    GetAuthor,
    /// Version the next release is compared against
    GetPreviousVersion,
    /// Repository descriptor
    GetRepository,
    /// Package-partitioned changelog lines
    RenderChangelogLine,
    /// Release the given version
    Publish,
}

impl ExtensionPoint {
    /// Get the point name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAuthor => "get-author",
            Self::GetPreviousVersion => "get-previous-version",
            Self::GetRepository => "get-repository",
            Self::RenderChangelogLine => "render-changelog-line",
            Self::Publish => "publish",
        }
    }

    /// Get all points
    pub fn all() -> &'static [ExtensionPoint] {
        &[
            Self::GetAuthor,
            Self::GetPreviousVersion,
            Self::GetRepository,
            Self::RenderChangelogLine,
            Self::Publish,
        ]
    }
}

impl std::fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plugin tapping one or more extension points
///
/// Every method defaults to "no value" so a plugin only implements the
/// points it taps.
#[async_trait]
pub trait ReleasePlugin: Send + Sync {
    /// Plugin name used in logs
    fn name(&self) -> &str;

    /// Points this plugin taps
    fn taps(&self) -> &[ExtensionPoint];

    async fn get_author(&self) -> Result<Option<Author>> {
        Ok(None)
    }

    async fn get_previous_version(&self, _normalize: &NormalizeFn<'_>) -> Result<Option<String>> {
        Ok(None)
    }

    async fn get_repository(&self) -> Result<Option<RepositoryInfo>> {
        Ok(None)
    }

    async fn render_changelog_lines(
        &self,
        _commits: &[ChangelogCommit],
        _render: &LineRenderFn,
    ) -> Result<Option<Vec<String>>> {
        Ok(None)
    }

    async fn publish(&self, _version: &str) -> Result<()> {
        Ok(())
    }
}

/// Registry of plugins, owned by the release tool
#[derive(Default)]
pub struct ExtensionRegistry {
    plugins: Vec<Arc<dyn ReleasePlugin>>,
}

impl ExtensionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Arc<dyn ReleasePlugin>) {
        debug!(plugin = plugin.name(), taps = ?plugin.taps(), "registering plugin");
        self.plugins.push(plugin);
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugin is registered
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Names of plugins tapping `point`, in call order
    pub fn tapped(&self, point: ExtensionPoint) -> Vec<&str> {
        self.tapping(point).map(|p| p.name()).collect()
    }

    fn tapping(&self, point: ExtensionPoint) -> impl Iterator<Item = &Arc<dyn ReleasePlugin>> {
        self.plugins
            .iter()
            .filter(move |p| p.taps().contains(&point))
    }

    #[instrument(skip(self))]
    pub async fn get_author(&self) -> Result<Option<Author>> {
        for plugin in self.tapping(ExtensionPoint::GetAuthor) {
            if let Some(author) = plugin.get_author().await? {
                return Ok(Some(author));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self, normalize))]
    pub async fn get_previous_version(
        &self,
        normalize: &NormalizeFn<'_>,
    ) -> Result<Option<String>> {
        for plugin in self.tapping(ExtensionPoint::GetPreviousVersion) {
            if let Some(version) = plugin.get_previous_version(normalize).await? {
                return Ok(Some(version));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self))]
    pub async fn get_repository(&self) -> Result<Option<RepositoryInfo>> {
        for plugin in self.tapping(ExtensionPoint::GetRepository) {
            if let Some(repository) = plugin.get_repository().await? {
                return Ok(Some(repository));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self, commits, render), fields(commit_count = commits.len()))]
    pub async fn render_changelog_lines(
        &self,
        commits: &[ChangelogCommit],
        render: &LineRenderFn,
    ) -> Result<Option<Vec<String>>> {
        for plugin in self.tapping(ExtensionPoint::RenderChangelogLine) {
            if let Some(lines) = plugin.render_changelog_lines(commits, render).await? {
                return Ok(Some(lines));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, version: &str) -> Result<()> {
        for plugin in self.tapping(ExtensionPoint::Publish) {
            debug!(plugin = plugin.name(), version, "running publish");
            plugin.publish(version).await?;
        }
        Ok(())
    }
}
