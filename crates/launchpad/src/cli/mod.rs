//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{
    ChangelogCommand, InfoCommand, InitCommand, ModeCommand, PreviousVersionCommand,
    PublishCommand,
};

/// Launchpad - Release automation for npm packages and lerna monorepos
#[derive(Debug, Parser)]
#[command(name = "launchpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter configuration file
    Init(InitCommand),

    /// Show whether the repository is a single package or a workspace
    Mode(ModeCommand),

    /// Resolve the version the next release builds on
    PreviousVersion(PreviousVersionCommand),

    /// Generate package-partitioned changelog lines
    Changelog(ChangelogCommand),

    /// Publish a release
    Publish(PublishCommand),

    /// Show author and repository details from the root manifest
    Info(InfoCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Mode(ref cmd) => cmd.execute(&self),
            Commands::PreviousVersion(ref cmd) => cmd.execute(&self),
            Commands::Changelog(ref cmd) => cmd.execute(&self),
            Commands::Publish(ref cmd) => cmd.execute(&self),
            Commands::Info(ref cmd) => cmd.execute(&self),
        }
    }
}
