//! Publish command

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use launchpad_core::config::load_config_or_default;
use launchpad_core::version::parse_prefixed;

use crate::cli::commands::ReleaseContext;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Publish a release at the given version
#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Version to release
    #[arg(id = "release_version", value_name = "VERSION")]
    pub version: String,

    /// Log the release commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl PublishCommand {
    /// Execute the publish command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = %self.version, dry_run = self.dry_run, "executing publish command");
        let cwd = std::env::current_dir()?;
        let (mut config, config_path) = load_config_or_default(&cwd)?;
        parse_prefixed(&self.version, &config.versioning.tag_prefix)?;
        config.publish.dry_run |= self.dry_run;
        let dry_run = config.publish.dry_run;

        let ctx = ReleaseContext::with_config(&cwd, config, config_path)?;

        if cli.format == OutputFormat::Text && !cli.quiet {
            println!(
                "Publishing {} ({})",
                output::version_style().apply_to(&self.version),
                ctx.mode
            );
            if dry_run {
                println!("  {}", style("[DRY RUN - no changes will be made]").yellow().bold());
            }
        }

        if !self.yes && !dry_run && cli.format == OutputFormat::Text {
            let confirmed = Confirm::new()
                .with_prompt("Proceed with publish?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        ctx.extensions.publish(&self.version).await?;

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "version": self.version,
                    "mode": ctx.mode,
                    "dry_run": dry_run,
                    "published": !dry_run,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text if !cli.quiet => {
                if dry_run {
                    output::success("Dry run complete");
                } else {
                    output::success(&format!("Published {}", self.version));
                }
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }
}
