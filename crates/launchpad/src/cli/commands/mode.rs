//! Mode command

use clap::Args;
use console::style;
use tracing::info;

use crate::cli::commands::ReleaseContext;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Show the detected repository mode
#[derive(Debug, Args)]
pub struct ModeCommand {}

impl ModeCommand {
    /// Execute the mode command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing mode command");
        let cwd = std::env::current_dir()?;
        let ctx = ReleaseContext::load(&cwd)?;

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "mode": ctx.mode,
                    "root": ctx.root.to_string_lossy(),
                    "marker_file": ctx.config.workspace.marker_file,
                    "config_path": ctx.config_path.map(|p| p.to_string_lossy().to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    println!("{}", ctx.mode);
                    return Ok(());
                }

                println!("{}", style("Repository").bold());
                println!("{}", output::key_value("Mode", &style(ctx.mode).green().to_string()));
                println!(
                    "{}",
                    output::key_value(
                        "Root",
                        &output::path_style().apply_to(ctx.root.display()).to_string()
                    )
                );
                if cli.verbose {
                    println!(
                        "{}",
                        output::key_value("Marker file", &ctx.config.workspace.marker_file)
                    );
                    let config = ctx
                        .config_path
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "none (using defaults)".to_string());
                    println!("{}", output::key_value("Config", &config));
                }
            }
        }

        Ok(())
    }
}
