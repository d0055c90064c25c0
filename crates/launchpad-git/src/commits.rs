//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::{ErrorCode, Oid, Sort};
use tracing::debug;

use launchpad_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get commits reachable from HEAD but not from `since` (any revspec)
    pub fn commits_since(&self, since: &str) -> Result<Vec<CommitInfo>> {
        let since_oid = self
            .repo
            .revparse_single(since)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| not_found_or(e, since))?
            .id();
        self.walk(Some(since_oid))
    }

    /// Get all commits on the current branch
    pub fn all_commits(&self) -> Result<Vec<CommitInfo>> {
        self.walk(None)
    }

    fn walk(&self, hide: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        if let Some(oid) = hide {
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_info(&commit));
        }

        debug!(count = commits.len(), "walked commit history");
        Ok(commits)
    }

    /// Paths changed by a commit relative to its first parent
    ///
    /// A root commit is compared against the empty tree. Paths use `/`
    /// separators regardless of platform.
    pub fn changed_files(&self, commit: &str) -> Result<Vec<String>> {
        let commit_obj = self
            .repo
            .revparse_single(commit)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| not_found_or(e, commit))?;

        let tree = commit_obj.tree()?;
        let parent_tree = if commit_obj.parent_count() > 0 {
            Some(commit_obj.parent(0)?.tree()?)
        } else {
            None
        };

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let files: Vec<String> = diff
            .deltas()
            .filter_map(|delta| delta.new_file().path().or_else(|| delta.old_file().path()))
            .map(|path| path.to_string_lossy().replace('\\', "/"))
            .collect();

        debug!(commit, count = files.len(), "listed changed files");
        Ok(files)
    }
}

fn not_found_or(e: git2::Error, spec: &str) -> GitError {
    if e.code() == ErrorCode::NotFound {
        GitError::CommitNotFound(spec.to_string())
    } else {
        GitError::Git2(e)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(
        commit.id().to_string(),
        commit.summary().unwrap_or("(no message)"),
        author.name().unwrap_or("Unknown"),
        timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn commit_files(repo: &Repository, root: &Path, files: &[&str], message: &str) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let mut index = repo.index().unwrap();
        for file in files {
            let full = root.join(file);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(&full, message).unwrap();
            index.add_path(Path::new(file)).unwrap();
        }
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit<'_>> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    #[test]
    fn test_changed_files_relative_to_parent() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        commit_files(&repo, temp.path(), &["README.md"], "initial");
        let oid = commit_files(
            &repo,
            temp.path(),
            &["packages/foo/a.ts", "packages/@bar/baz/b.ts"],
            "feat: two packages",
        );

        let git_repo = GitRepo::open(temp.path()).unwrap();
        let mut files = git_repo.changed_files(&oid.to_string()).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec![
                "packages/@bar/baz/b.ts".to_string(),
                "packages/foo/a.ts".to_string()
            ]
        );
    }

    #[test]
    fn test_commit_info_records_author() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let oid = commit_files(&repo, temp.path(), &["README.md"], "docs: readme\n\nbody");

        let git_repo = GitRepo::open(temp.path()).unwrap();
        let commits = git_repo.all_commits().unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].hash, oid.to_string());
        assert_eq!(commits[0].message, "docs: readme");
        assert_eq!(commits[0].author, "Test");
        assert!(commits[0].timestamp.timestamp() > 0);
    }

    #[test]
    fn test_changed_files_root_commit() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let oid = commit_files(&repo, temp.path(), &["package.json"], "initial");

        let git_repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(
            git_repo.changed_files(&oid.to_string()).unwrap(),
            vec!["package.json".to_string()]
        );
    }

    #[test]
    fn test_changed_files_unknown_commit() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        commit_files(&repo, temp.path(), &["a.txt"], "initial");

        let git_repo = GitRepo::open(temp.path()).unwrap();
        let result = git_repo.changed_files("0123456789abcdef0123456789abcdef01234567");
        assert!(matches!(result, Err(GitError::CommitNotFound(_))));
    }

    #[test]
    fn test_commits_since() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let first = commit_files(&repo, temp.path(), &["a.txt"], "initial");
        commit_files(&repo, temp.path(), &["b.txt"], "feat: b");
        commit_files(&repo, temp.path(), &["c.txt"], "fix: c");

        let git_repo = GitRepo::open(temp.path()).unwrap();
        let commits = git_repo.commits_since(&first.to_string()).unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "fix: c");
        assert_eq!(commits[1].message, "feat: b");
        assert_eq!(git_repo.all_commits().unwrap().len(), 3);
    }
}
