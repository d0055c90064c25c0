//! Async version-control queries over a working directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use launchpad_core::error::{GitError, Result};
use launchpad_core::traits::VcsQuery;

use crate::repository::GitRepo;

/// A repository working directory answering [`VcsQuery`] requests
///
/// libgit2 handles are not `Sync`, so each query opens the repository on
/// the blocking pool. Queries can therefore run concurrently.
#[derive(Debug, Clone)]
pub struct GitWorkdir {
    root: PathBuf,
}

impl GitWorkdir {
    /// Create a query handle for the repository at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl VcsQuery for GitWorkdir {
    async fn changed_files(&self, commit: &str) -> Result<Vec<String>> {
        let root = self.root.clone();
        let hash = commit.to_string();

        let files = tokio::task::spawn_blocking(move || {
            GitRepo::open(&root).and_then(|repo| repo.changed_files(&hash))
        })
        .await
        .map_err(|e| GitError::TaskFailed(e.to_string()))??;

        debug!(commit, count = files.len(), "queried changed files");
        Ok(files)
    }
}
