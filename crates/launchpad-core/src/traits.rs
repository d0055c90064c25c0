//! Collaborator traits
//!
//! The workflows in this crate never touch the filesystem, the network or
//! a child process directly. They talk to these traits instead, so every
//! workflow can run against in-memory fakes.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Manifest, Package, WorkspaceMarker};

/// Loads package and workspace manifests for one repository root
#[async_trait]
pub trait ManifestReader: Send + Sync {
    /// The root package manifest, or `None` when the repository has none
    async fn root_manifest(&self) -> Result<Option<Manifest>>;

    /// The workspace marker file
    async fn workspace_marker(&self) -> Result<WorkspaceMarker>;

    /// Every sub-package of the workspace
    async fn workspace_packages(&self) -> Result<Vec<Package>>;
}

/// Queries a package registry
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Latest published version of `name`
    ///
    /// Fails with `RegistryError::NotPublished` when the package was never
    /// published.
    async fn latest_version(&self, name: &str) -> Result<String>;
}

/// Queries version control history
#[async_trait]
pub trait VcsQuery: Send + Sync {
    /// Paths changed by `commit` relative to its first parent
    async fn changed_files(&self, commit: &str) -> Result<Vec<String>>;
}

/// Performs the actual release side effects
#[async_trait]
pub trait ReleaseDispatcher: Send + Sync {
    /// Publish every workspace package at `version`, regardless of per-package diff
    async fn publish_workspace(&self, version: &str) -> Result<()>;

    /// Bump the root manifest to `version` and publish the artifact
    async fn publish_single(&self, version: &str) -> Result<()>;

    /// Push the release commit and its tags upstream
    async fn push_tags(&self) -> Result<()>;
}

/// Package names touched by a commit
pub type PackageSet = BTreeSet<String>;

/// Normalization ("prefixing") applied identically to both sides of a version comparison
pub type NormalizeFn<'a> = dyn Fn(&str) -> String + Send + Sync + 'a;
