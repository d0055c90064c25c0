//! Release plugin for npm repositories

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use launchpad_changelog::{ChangelogPartitioner, CommitPackageMapper};
use launchpad_core::config::{Config, UnpublishedPolicy};
use launchpad_core::error::Result;
use launchpad_core::extensions::{ExtensionPoint, LineRenderFn, ReleasePlugin};
use launchpad_core::traits::{
    ManifestReader, NormalizeFn, RegistryClient, ReleaseDispatcher, VcsQuery,
};
use launchpad_core::types::{Author, ChangelogCommit, RepositoryInfo, RepositoryMode};
use launchpad_core::workflow::{PublishOrchestrator, VersionResolver};

use crate::command::CommandRunner;
use crate::dispatch::NpmDispatcher;
use crate::registry::NpmRegistry;
use crate::repository::parse_repository;
use crate::workspace::NpmManifestReader;

/// Taps every extension point for an npm single-package repo or lerna monorepo
pub struct NpmPlugin {
    mode: RepositoryMode,
    manifests: Arc<dyn ManifestReader>,
    registry: Arc<dyn RegistryClient>,
    dispatcher: Arc<dyn ReleaseDispatcher>,
    mapper: CommitPackageMapper,
    partitioner: ChangelogPartitioner,
    on_unpublished: UnpublishedPolicy,
    tag_prefix: String,
}

impl NpmPlugin {
    /// Create a plugin over explicit collaborators
    pub fn new(
        mode: RepositoryMode,
        manifests: Arc<dyn ManifestReader>,
        registry: Arc<dyn RegistryClient>,
        dispatcher: Arc<dyn ReleaseDispatcher>,
        mapper: CommitPackageMapper,
    ) -> Self {
        Self {
            mode,
            manifests,
            registry,
            dispatcher,
            mapper,
            partitioner: ChangelogPartitioner::new(),
            on_unpublished: UnpublishedPolicy::default(),
            tag_prefix: String::new(),
        }
    }

    /// Wire up the npm collaborators for the repository at `root`
    ///
    /// The mode is detected once here. `current_branch` is used for the
    /// push when the config names no branch.
    pub fn from_config(
        root: &Path,
        config: &Config,
        runner: Arc<dyn CommandRunner>,
        vcs: Arc<dyn VcsQuery>,
        current_branch: Option<String>,
    ) -> Self {
        let reader = NpmManifestReader::new(root, &config.workspace.marker_file);
        let mode = reader.mode();
        debug!(mode = %mode, root = %root.display(), "detected repository mode");

        let registry = NpmRegistry::new(runner.clone()).with_registry_url(config.registry.url.clone());
        let dispatcher = NpmDispatcher::new(runner, config.publish.clone())
            .with_registry_url(config.registry.url.clone())
            .with_current_branch(current_branch);
        let mapper = CommitPackageMapper::new(vcs, &config.workspace.packages_dir)
            .with_concurrency(config.changelog.concurrency);

        Self::new(
            mode,
            Arc::new(reader),
            Arc::new(registry),
            Arc::new(dispatcher),
            mapper,
        )
        .with_partitioner(ChangelogPartitioner::new().with_indent(&config.changelog.indent))
        .with_unpublished_policy(config.registry.on_unpublished)
        .with_tag_prefix(&config.versioning.tag_prefix)
    }

    /// Replace the changelog partitioner
    pub fn with_partitioner(mut self, partitioner: ChangelogPartitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Set the policy for packages the registry has never seen
    pub fn with_unpublished_policy(mut self, policy: UnpublishedPolicy) -> Self {
        self.on_unpublished = policy;
        self
    }

    /// Set the prefix versions carry once normalized
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Detected repository mode
    pub fn mode(&self) -> RepositoryMode {
        self.mode
    }
}

#[async_trait]
impl ReleasePlugin for NpmPlugin {
    fn name(&self) -> &str {
        "npm"
    }

    fn taps(&self) -> &[ExtensionPoint] {
        ExtensionPoint::all()
    }

    async fn get_author(&self) -> Result<Option<Author>> {
        Ok(self
            .manifests
            .root_manifest()
            .await?
            .and_then(|manifest| manifest.author))
    }

    async fn get_previous_version(&self, normalize: &NormalizeFn<'_>) -> Result<Option<String>> {
        VersionResolver::new(self.manifests.as_ref(), self.registry.as_ref())
            .with_unpublished_policy(self.on_unpublished)
            .with_tag_prefix(&self.tag_prefix)
            .resolve_previous_version(self.mode, normalize)
            .await
    }

    async fn get_repository(&self) -> Result<Option<RepositoryInfo>> {
        let repository = self
            .manifests
            .root_manifest()
            .await?
            .and_then(|manifest| manifest.repository);

        Ok(repository.and_then(|field| parse_repository(field.url())))
    }

    #[instrument(skip(self, commits, render), fields(mode = %self.mode, commit_count = commits.len()))]
    async fn render_changelog_lines(
        &self,
        commits: &[ChangelogCommit],
        render: &LineRenderFn,
    ) -> Result<Option<Vec<String>>> {
        if !self.mode.is_workspace() || commits.is_empty() {
            return Ok(None);
        }

        let affected = self.mapper.map_commits(commits).await?;
        Ok(self.partitioner.partition(commits, &affected, render))
    }

    async fn publish(&self, version: &str) -> Result<()> {
        PublishOrchestrator::new(self.dispatcher.as_ref())
            .publish(self.mode, version)
            .await
    }
}
