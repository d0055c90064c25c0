//! Launchpad Core - Core library for release automation
//!
//! This crate provides the shared data model, error handling, configuration,
//! collaborator traits and the release workflows: resolving the previous
//! release version and dispatching a release by repository mode.

pub mod config;
pub mod error;
pub mod extensions;
pub mod traits;
pub mod types;
pub mod version;
pub mod workflow;

pub use error::{LaunchpadError, Result};
pub use extensions::{ExtensionPoint, ExtensionRegistry, LineRenderFn, ReleasePlugin};
pub use traits::{
    ManifestReader, NormalizeFn, PackageSet, RegistryClient, ReleaseDispatcher, VcsQuery,
};
pub use types::{
    Author, ChangelogCommit, Manifest, Package, RepositoryField, RepositoryInfo, RepositoryMode,
    WorkspaceMarker,
};
pub use workflow::{PublishOrchestrator, VersionResolver};
