//! Changelog partitioning by affected packages

use indexmap::IndexMap;
use tracing::debug;

use launchpad_core::extensions::LineRenderFn;
use launchpad_core::traits::PackageSet;
use launchpad_core::types::ChangelogCommit;

use crate::mapper::AffectedPackages;

/// Bucket for commits that touched no workspace package
pub const MONOREPO_BUCKET: &str = "monorepo";

/// Bucket key for a package set
///
/// Names are quoted individually and joined in sorted order, so the key
/// depends only on the set contents.
pub fn bucket_key(packages: &PackageSet) -> String {
    if packages.is_empty() {
        return MONOREPO_BUCKET.to_string();
    }

    packages
        .iter()
        .map(|name| format!("`{}`", name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Default rendering of a single changelog line
pub fn default_line(commit: &ChangelogCommit) -> String {
    format!("- {} ({})", commit.subject, commit.short_hash())
}

/// Groups rendered changelog lines into per-package sections
#[derive(Debug, Clone)]
pub struct ChangelogPartitioner {
    indent: String,
}

impl Default for ChangelogPartitioner {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

impl ChangelogPartitioner {
    /// Create a partitioner with the default two-space indent
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indent used for lines nested under a package header
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Partition `commits` into sections
    ///
    /// Returns `None` when there are no commits or when every commit lands
    /// in the monorepo bucket. Commits missing from `affected` count as
    /// touching no package.
    pub fn partition(
        &self,
        commits: &[ChangelogCommit],
        affected: &AffectedPackages,
        render: &LineRenderFn,
    ) -> Option<Vec<String>> {
        let empty = PackageSet::new();
        let mut buckets: IndexMap<String, Vec<String>> = IndexMap::new();

        for commit in commits {
            let packages = affected.get(&commit.hash).unwrap_or(&empty);
            buckets
                .entry(bucket_key(packages))
                .or_default()
                .push(render(commit));
        }

        if buckets.is_empty()
            || (buckets.len() == 1 && buckets.contains_key(MONOREPO_BUCKET))
        {
            debug!(buckets = buckets.len(), "no package structure to show");
            return None;
        }

        let mut lines = buckets.shift_remove(MONOREPO_BUCKET).unwrap_or_default();

        for (key, bucket_lines) in &buckets {
            lines.push(format!("- {}", key));
            lines.extend(
                bucket_lines
                    .iter()
                    .map(|line| format!("{}{}", self.indent, line)),
            );
        }

        debug!(buckets = buckets.len(), lines = lines.len(), "partitioned changelog");
        Some(lines)
    }
}

/// Partition with the default indent
pub fn partition(
    commits: &[ChangelogCommit],
    affected: &AffectedPackages,
    render: &LineRenderFn,
) -> Option<Vec<String>> {
    ChangelogPartitioner::new().partition(commits, affected, render)
}

/// Render every commit as a flat list, no sections
pub fn render_flat(commits: &[ChangelogCommit], render: &LineRenderFn) -> Vec<String> {
    commits.iter().map(|commit| render(commit)).collect()
}
