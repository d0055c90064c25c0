//! Release side effects through lerna, npm and git

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use launchpad_core::config::PublishConfig;
use launchpad_core::error::{ConfigError, GitError, Result};
use launchpad_core::traits::ReleaseDispatcher;

use crate::command::{CommandRunner, CommandSpec};

/// Runs the release commands for npm packages
pub struct NpmDispatcher {
    runner: Arc<dyn CommandRunner>,
    config: PublishConfig,
    registry_url: Option<String>,
}

impl NpmDispatcher {
    /// Create a dispatcher with the given publish settings
    pub fn new(runner: Arc<dyn CommandRunner>, config: PublishConfig) -> Self {
        Self {
            runner,
            config,
            registry_url: None,
        }
    }

    /// Publish to a custom registry
    pub fn with_registry_url(mut self, url: Option<String>) -> Self {
        self.registry_url = url;
        self
    }

    /// Use `branch` when the config does not name one
    pub fn with_current_branch(mut self, branch: Option<String>) -> Self {
        if self.config.branch.is_none() {
            self.config.branch = branch;
        }
        self
    }

    fn with_registry(&self, cmd: CommandSpec) -> CommandSpec {
        match &self.registry_url {
            Some(url) => cmd.arg("--registry").arg(url),
            None => cmd,
        }
    }

    /// Workspace publish: every package at `version`, changed or not
    pub fn workspace_command(&self, version: &str) -> Result<CommandSpec> {
        let lerna = CommandSpec::from_command_line(&self.config.lerna_command).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "publish.lerna_command".to_string(),
                message: "must not be empty".to_string(),
            }
        })?;

        let cmd = lerna
            .args(["publish", version, "--force-publish", "--yes", "-m"])
            .arg(format!("%v {}", self.config.skip_ci_marker));
        Ok(self.with_registry(cmd))
    }

    /// Single package version bump, committed and tagged by npm
    pub fn bump_command(&self, version: &str) -> CommandSpec {
        CommandSpec::new("npm")
            .args(["version", version, "-m"])
            .arg(format!("Bump version to: %s {}", self.config.skip_ci_marker))
    }

    /// Single package publish
    pub fn publish_command(&self) -> CommandSpec {
        self.with_registry(CommandSpec::new("npm").arg("publish"))
    }

    /// Push the release commit and its tags
    pub fn push_command(&self) -> Result<CommandSpec> {
        let branch = self.config.branch.as_deref().ok_or(GitError::NoBranch)?;
        Ok(CommandSpec::new("git").args([
            "push",
            "--follow-tags",
            "--set-upstream",
            self.config.remote.as_str(),
            branch,
        ]))
    }

    async fn execute(&self, cmd: CommandSpec) -> Result<()> {
        if self.config.dry_run {
            info!(command = %cmd, "dry run, skipping command");
            return Ok(());
        }

        info!(command = %cmd, "running release command");
        self.runner.run(&cmd).await?;
        Ok(())
    }
}

#[async_trait]
impl ReleaseDispatcher for NpmDispatcher {
    #[instrument(skip(self))]
    async fn publish_workspace(&self, version: &str) -> Result<()> {
        let cmd = self.workspace_command(version)?;
        self.execute(cmd).await
    }

    #[instrument(skip(self))]
    async fn publish_single(&self, version: &str) -> Result<()> {
        self.execute(self.bump_command(version)).await?;
        self.execute(self.publish_command()).await
    }

    #[instrument(skip(self))]
    async fn push_tags(&self) -> Result<()> {
        let cmd = self.push_command()?;
        self.execute(cmd).await
    }
}
