//! Previous version command

use clap::Args;
use tracing::info;

use crate::cli::commands::ReleaseContext;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Resolve the previous release version
#[derive(Debug, Args)]
pub struct PreviousVersionCommand {}

impl PreviousVersionCommand {
    /// Execute the previous-version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing previous-version command");
        let cwd = std::env::current_dir()?;
        let ctx = ReleaseContext::load(&cwd)?;
        let previous = resolve(&ctx).await?;

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "mode": ctx.mode,
                    "previous_version": previous,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => match previous {
                Some(version) => {
                    println!("{}", output::version_style().apply_to(version));
                }
                None if !cli.quiet => {
                    output::warning("No previous version: the root manifest has no version");
                }
                None => {}
            },
        }

        Ok(())
    }
}

/// Ask the registered plugins for the previous version, prefixed per config
async fn resolve(ctx: &ReleaseContext) -> anyhow::Result<Option<String>> {
    let normalize = |version: &str| ctx.normalize(version);
    Ok(ctx.extensions.get_previous_version(&normalize).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::types::RepositoryMode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_workspace_without_packages_uses_prefixed_baseline() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("lerna.json"), r#"{"version": "1.4.0"}"#).unwrap();

        let ctx = ReleaseContext::load(temp.path()).unwrap();
        assert_eq!(ctx.mode, RepositoryMode::Workspace);
        assert_eq!(resolve(&ctx).await.unwrap().as_deref(), Some("v1.4.0"));
    }

    #[tokio::test]
    async fn test_configured_prefix_is_applied() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("lerna.json"), r#"{"version": "1.4.0"}"#).unwrap();
        std::fs::write(
            temp.path().join("launchpad.toml"),
            "[versioning]\ntag_prefix = \"release-\"\n",
        )
        .unwrap();

        let ctx = ReleaseContext::load(temp.path()).unwrap();
        assert_eq!(resolve(&ctx).await.unwrap().as_deref(), Some("release-1.4.0"));
    }

    #[tokio::test]
    async fn test_single_without_version_is_unset() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.json"), r#"{"name": "app"}"#).unwrap();

        let ctx = ReleaseContext::load(temp.path()).unwrap();
        assert_eq!(ctx.mode, RepositoryMode::Single);
        assert_eq!(resolve(&ctx).await.unwrap(), None);
    }
}
