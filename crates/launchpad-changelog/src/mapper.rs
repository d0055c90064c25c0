//! Commit to package attribution
//!
//! A commit belongs to every workspace package whose directory holds one of
//! the files it changed. Queries for a batch of commits fan out over the
//! VCS concurrently and are joined back by commit hash before anything reads
//! them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument};

use launchpad_core::config::default_concurrency;
use launchpad_core::error::{GitError, LaunchpadError, Result};
use launchpad_core::traits::{PackageSet, VcsQuery};
use launchpad_core::types::ChangelogCommit;

/// Computed package sets, keyed by commit hash
pub type AffectedPackages = HashMap<String, PackageSet>;

/// Scope marker that starts a scoped package directory (`@scope/name`)
const SCOPE_MARKER: char = '@';

/// Package identifiers named by a list of changed paths
///
/// A path counts only when its first segment is `packages_dir` and at least
/// two segments follow it, so files sitting directly in `packages_dir` are
/// ignored. Scoped packages live one level deeper and are reported as
/// `@scope/name`.
pub fn packages_from_paths<I, S>(paths: I, packages_dir: &str) -> PackageSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packages = PackageSet::new();

    for path in paths {
        let segments: Vec<&str> = path.as_ref().split('/').collect();
        if segments.len() < 3 || segments[0] != packages_dir {
            continue;
        }

        let rest = &segments[1..];
        if rest[0].starts_with(SCOPE_MARKER) && rest.len() >= 3 {
            packages.insert(format!("{}/{}", rest[0], rest[1]));
        } else {
            packages.insert(rest[0].to_string());
        }
    }

    packages
}

/// Maps commits to the workspace packages they changed
pub struct CommitPackageMapper {
    vcs: Arc<dyn VcsQuery>,
    packages_dir: String,
    concurrency: usize,
}

impl CommitPackageMapper {
    /// Create a mapper over `vcs` for packages under `packages_dir`
    pub fn new(vcs: Arc<dyn VcsQuery>, packages_dir: impl Into<String>) -> Self {
        Self {
            vcs,
            packages_dir: packages_dir.into(),
            concurrency: default_concurrency(),
        }
    }

    /// Limit the number of VCS queries in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Compute the package set of every commit in `commits`
    ///
    /// Each distinct hash is queried once. The first failing query aborts
    /// the ones still running and its error is returned.
    #[instrument(skip(self, commits), fields(commit_count = commits.len(), concurrency = self.concurrency))]
    pub async fn map_commits(&self, commits: &[ChangelogCommit]) -> Result<AffectedPackages> {
        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut affected = AffectedPackages::with_capacity(commits.len());
        let mut queued = std::collections::HashSet::new();

        for commit in commits {
            if !queued.insert(commit.hash.clone()) {
                continue;
            }

            let vcs = Arc::clone(&self.vcs);
            let semaphore = Arc::clone(&semaphore);
            let packages_dir = self.packages_dir.clone();
            let hash = commit.hash.clone();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| LaunchpadError::other(e.to_string()))?;
                let files = vcs.changed_files(&hash).await?;
                let packages = packages_from_paths(&files, &packages_dir);
                Ok::<_, LaunchpadError>((hash, packages))
            });
        }

        while let Some(joined) = tasks.join_next().await {
            let (hash, packages) = joined.map_err(|e| GitError::TaskFailed(e.to_string()))??;
            debug!(commit = %hash, packages = ?packages, "mapped commit");
            affected.insert(hash, packages);
        }

        info!(
            commits = affected.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "mapped commits to packages"
        );
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_unscoped_and_scoped_packages() {
        let packages = packages_from_paths(
            ["packages/foo/a.ts", "packages/@bar/baz/b.ts"],
            "packages",
        );
        let expected: PackageSet = ["@bar/baz".to_string(), "foo".to_string()]
            .into_iter()
            .collect();
        assert_eq!(packages, expected);
    }

    #[test]
    fn test_paths_outside_packages_dir() {
        assert!(packages_from_paths(["README.md", "src/packages/foo/a.ts"], "packages").is_empty());
    }

    #[test]
    fn test_too_shallow_paths() {
        // File directly in the packages directory
        assert!(packages_from_paths(["packages/README.md"], "packages").is_empty());

        // Scope directory with a single file falls back to the first segment
        let packages = packages_from_paths(["packages/@bar/index.ts"], "packages");
        assert_eq!(packages.into_iter().collect::<Vec<_>>(), vec!["@bar"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let packages = packages_from_paths(
            ["packages/foo/a.ts", "packages/foo/src/b.ts", "packages/foo/c.ts"],
            "packages",
        );
        assert_eq!(packages.len(), 1);
    }

    #[test]
    fn test_custom_packages_dir() {
        let packages = packages_from_paths(["libs/core/lib.rs", "packages/foo/a.ts"], "libs");
        assert_eq!(packages.into_iter().collect::<Vec<_>>(), vec!["core"]);
    }

    struct FakeVcs {
        files: HashMap<String, Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: AtomicUsize,
    }

    impl FakeVcs {
        fn new(entries: &[(&str, &[&str])]) -> Self {
            Self {
                files: entries
                    .iter()
                    .map(|(hash, files)| {
                        (
                            hash.to_string(),
                            files.iter().map(|f| f.to_string()).collect(),
                        )
                    })
                    .collect(),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VcsQuery for FakeVcs {
        async fn changed_files(&self, commit: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            // Earlier commits finish later
            let delay = 30u64.saturating_sub(commit.len() as u64 * 3);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.files
                .get(commit)
                .cloned()
                .ok_or_else(|| GitError::CommitNotFound(commit.to_string()).into())
        }
    }

    #[tokio::test]
    async fn test_map_commits_joins_by_hash() {
        let vcs = Arc::new(FakeVcs::new(&[
            ("a", &["packages/foo/a.ts"]),
            ("bb", &["README.md"]),
            ("ccc", &["packages/@bar/baz/b.ts", "packages/foo/c.ts"]),
        ]));
        let mapper = CommitPackageMapper::new(vcs, "packages");

        let commits = vec![
            ChangelogCommit::new("a", "one"),
            ChangelogCommit::new("bb", "two"),
            ChangelogCommit::new("ccc", "three"),
        ];
        let affected = mapper.map_commits(&commits).await.unwrap();

        assert_eq!(affected.len(), 3);
        assert_eq!(affected["a"].iter().collect::<Vec<_>>(), vec!["foo"]);
        assert!(affected["bb"].is_empty());
        assert_eq!(
            affected["ccc"].iter().collect::<Vec<_>>(),
            vec!["@bar/baz", "foo"]
        );
    }

    #[tokio::test]
    async fn test_map_commits_respects_concurrency() {
        let entries: Vec<(String, Vec<&str>)> = (0..6)
            .map(|i| ("x".repeat(i + 1), vec!["packages/foo/a.ts"]))
            .collect();
        let borrowed: Vec<(&str, &[&str])> = entries
            .iter()
            .map(|(hash, files)| (hash.as_str(), files.as_slice()))
            .collect();
        let vcs = Arc::new(FakeVcs::new(&borrowed));

        let mapper = CommitPackageMapper::new(vcs.clone(), "packages").with_concurrency(2);
        let commits: Vec<_> = entries
            .iter()
            .map(|(hash, _)| ChangelogCommit::new(hash, "subject"))
            .collect();

        let affected = mapper.map_commits(&commits).await.unwrap();
        assert_eq!(affected.len(), 6);
        assert!(vcs.max_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_duplicate_hashes_queried_once() {
        let vcs = Arc::new(FakeVcs::new(&[("a", &["packages/foo/a.ts"])]));
        let mapper = CommitPackageMapper::new(vcs.clone(), "packages");

        let commits = vec![ChangelogCommit::new("a", "one"), ChangelogCommit::new("a", "one")];
        mapper.map_commits(&commits).await.unwrap();
        assert_eq!(vcs.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_map_commits_propagates_failure() {
        let vcs = Arc::new(FakeVcs::new(&[("a", &["packages/foo/a.ts"])]));
        let mapper = CommitPackageMapper::new(vcs, "packages");

        let commits = vec![
            ChangelogCommit::new("a", "one"),
            ChangelogCommit::new("missing", "two"),
        ];
        let err = mapper.map_commits(&commits).await.unwrap_err();
        assert!(matches!(err, LaunchpadError::Git(GitError::CommitNotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let vcs = Arc::new(FakeVcs::new(&[]));
        let mapper = CommitPackageMapper::new(vcs, "packages");
        assert!(mapper.map_commits(&[]).await.unwrap().is_empty());
    }

    #[test]
    fn test_default_concurrency_matches_config() {
        let mapper = CommitPackageMapper::new(Arc::new(FakeVcs::new(&[])), "packages");
        assert_eq!(
            mapper.concurrency,
            launchpad_core::config::ChangelogConfig::default().concurrency
        );
        assert_eq!(mapper.with_concurrency(0).concurrency, 1);
    }
}
