//! Changelog command

use clap::Args;
use console::style;
use tracing::{debug, info};

use launchpad_changelog::{default_line, render_flat};
use launchpad_core::types::ChangelogCommit;
use launchpad_git::{CommitInfo, GitRepo};

use crate::cli::commands::ReleaseContext;
use crate::cli::{Cli, OutputFormat};

/// Commits selected for a changelog and where the range starts
struct CommitRange {
    since: Option<String>,
    commits: Vec<CommitInfo>,
}

fn commit_json(commit: &CommitInfo) -> serde_json::Value {
    serde_json::json!({
        "hash": commit.hash,
        "subject": commit.message,
        "author": commit.author,
        "timestamp": commit.timestamp.to_rfc3339(),
    })
}

/// Generate changelog lines grouped by the packages each commit touched
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// List commits since this revision (default: latest version tag)
    #[arg(long, value_name = "REF")]
    pub from: Option<String>,

    /// Regular expression selecting the tags considered for the default range
    #[arg(long, value_name = "REGEX")]
    pub tag_pattern: Option<String>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    /// Commits in the requested range, newest first
    fn collect_commits(&self, repo: &GitRepo) -> anyhow::Result<CommitRange> {
        let since = match &self.from {
            Some(from) => Some(from.clone()),
            None => match repo.find_latest_tag(self.tag_pattern.as_deref())? {
                Some(tag) => {
                    debug!(tag = %tag.name, commit = %tag.commit_hash, "range starts at tag");
                    Some(tag.name)
                }
                None => None,
            },
        };

        let commits = match &since {
            Some(since) => repo.commits_since(since)?,
            None => repo.all_commits()?,
        };
        info!(since = ?since, count = commits.len(), "collected commits");

        Ok(CommitRange { since, commits })
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(from = ?self.from, tag_pattern = ?self.tag_pattern, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let ctx = ReleaseContext::load(&cwd)?;

        let repo = GitRepo::discover(&cwd)?;
        let range = self.collect_commits(&repo)?;
        let commits: Vec<ChangelogCommit> = range
            .commits
            .iter()
            .map(CommitInfo::to_changelog_commit)
            .collect();

        if commits.is_empty() {
            if !cli.quiet {
                println!("{}", style("No commits found since last release.").yellow());
            }
            return Ok(());
        }

        let partitioned = ctx
            .extensions
            .render_changelog_lines(&commits, &default_line)
            .await?;
        let is_partitioned = partitioned.is_some();
        let lines = partitioned.unwrap_or_else(|| render_flat(&commits, &default_line));

        match cli.format {
            OutputFormat::Json => {
                let out = serde_json::json!({
                    "mode": ctx.mode,
                    "partitioned": is_partitioned,
                    "since": range.since,
                    "commits": range.commits.iter().map(commit_json).collect::<Vec<_>>(),
                    "lines": lines,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                for line in &lines {
                    println!("{}", line);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_commit_json_carries_author_and_time() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let commit = CommitInfo::new("abc123", "feat: launch", "Jane", timestamp);

        let value = commit_json(&commit);
        assert_eq!(value["hash"], "abc123");
        assert_eq!(value["subject"], "feat: launch");
        assert_eq!(value["author"], "Jane");
        assert_eq!(value["timestamp"], "2024-05-01T12:00:00+00:00");
    }
}
