use std::path::Path;
use std::sync::Arc;

use git2::{Repository, Signature};
use tempfile::TempDir;

use launchpad_changelog::{partition, CommitPackageMapper};
use launchpad_core::types::ChangelogCommit;
use launchpad_git::{GitRepo, GitWorkdir};

fn commit(repo: &Repository, root: &Path, files: &[&str], message: &str) {
    let sig = Signature::now("Test", "test@example.com").unwrap();
    let mut index = repo.index().unwrap();
    for file in files {
        let full = root.join(file);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(&full, message).unwrap();
        index.add_path(Path::new(file)).unwrap();
    }
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

fn subject(commit: &ChangelogCommit) -> String {
    commit.subject.clone()
}

#[tokio::test]
async fn partitions_real_history_by_package() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();

    commit(&repo, temp.path(), &["lerna.json"], "chore: init");
    commit(&repo, temp.path(), &["packages/foo/a.ts"], "feat: foo");
    commit(&repo, temp.path(), &["packages/@bar/baz/b.ts"], "fix: baz");
    commit(&repo, temp.path(), &["README.md"], "docs: readme");
    commit(
        &repo,
        temp.path(),
        &["packages/foo/c.ts", "packages/@bar/baz/d.ts"],
        "refactor: both",
    );

    let history: Vec<ChangelogCommit> = GitRepo::open(temp.path())
        .unwrap()
        .all_commits()
        .unwrap()
        .iter()
        .map(|c| c.to_changelog_commit())
        .collect();
    assert_eq!(history.len(), 5);

    let mapper = CommitPackageMapper::new(Arc::new(GitWorkdir::new(temp.path())), "packages")
        .with_concurrency(2);
    let affected = mapper.map_commits(&history).await.unwrap();

    let lines = partition(&history, &affected, &subject).unwrap();
    assert_eq!(
        lines,
        vec![
            "docs: readme",
            "chore: init",
            "- `@bar/baz`, `foo`",
            "  refactor: both",
            "- `@bar/baz`",
            "  fix: baz",
            "- `foo`",
            "  feat: foo",
        ]
    );
}

#[tokio::test]
async fn history_without_packages_is_suppressed() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();

    commit(&repo, temp.path(), &["package.json"], "chore: init");
    commit(&repo, temp.path(), &["src/index.js"], "feat: entry");

    let history: Vec<ChangelogCommit> = GitRepo::open(temp.path())
        .unwrap()
        .all_commits()
        .unwrap()
        .iter()
        .map(|c| c.to_changelog_commit())
        .collect();

    let mapper = CommitPackageMapper::new(Arc::new(GitWorkdir::new(temp.path())), "packages");
    let affected = mapper.map_commits(&history).await.unwrap();

    assert!(partition(&history, &affected, &subject).is_none());
}
