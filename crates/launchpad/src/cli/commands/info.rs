//! Info command

use clap::Args;
use console::style;
use tracing::info;

use launchpad_core::extensions::ExtensionPoint;

use crate::cli::commands::ReleaseContext;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Show author and repository from the root manifest
#[derive(Debug, Args)]
pub struct InfoCommand {}

impl InfoCommand {
    /// Execute the info command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing info command");
        let cwd = std::env::current_dir()?;
        let ctx = ReleaseContext::load(&cwd)?;

        let author = ctx.extensions.get_author().await?;
        let repository = ctx.extensions.get_repository().await?;

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "mode": ctx.mode,
                    "author": author,
                    "repository": repository,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                let missing = style("not set").yellow().to_string();
                println!("{}", style("Package").bold());
                println!("{}", output::key_value("Mode", ctx.mode.as_str()));
                println!(
                    "{}",
                    output::key_value(
                        "Author",
                        &author.as_ref().map(output::format_author).unwrap_or_else(|| missing.clone())
                    )
                );
                println!(
                    "{}",
                    output::key_value(
                        "Repository",
                        &repository.map(|r| r.to_string()).unwrap_or(missing)
                    )
                );

                if cli.verbose {
                    println!();
                    println!("{}", style("Extension points").bold());
                    for point in ExtensionPoint::all() {
                        let plugins = ctx.extensions.tapped(*point);
                        let value = if plugins.is_empty() {
                            style("none").dim().to_string()
                        } else {
                            plugins.join(", ")
                        };
                        println!("{}", output::key_value(point.as_str(), &value));
                    }
                }
            }
        }

        Ok(())
    }
}
