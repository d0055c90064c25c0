//! Core types for Launchpad

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Whether the repository holds one package or a workspace of packages
///
/// Detected once per run from the presence of the workspace marker file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryMode {
    /// A single package at the repository root
    Single,
    /// A monorepo with independently versioned sub-packages
    Workspace,
}

impl RepositoryMode {
    /// Returns the string representation of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Workspace => "workspace",
        }
    }

    /// Whether this is a monorepo
    pub fn is_workspace(&self) -> bool {
        matches!(self, Self::Workspace)
    }
}

impl std::fmt::Display for RepositoryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Package author as written in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    /// Free-form author string, e.g. `"Jane Doe <jane@example.com>"`
    Text(String),
    /// Structured author record
    Structured {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

/// Repository field as written in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryField {
    /// Shorthand or URL string
    Text(String),
    /// Structured repository record
    Structured {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        url: String,
        #[serde(default)]
        directory: Option<String>,
    },
}

impl RepositoryField {
    /// The URL or shorthand this field points at
    pub fn url(&self) -> &str {
        match self {
            Self::Text(url) => url,
            Self::Structured { url, .. } => url,
        }
    }
}

/// Package manifest schema
///
/// Only the fields release automation reads are modelled; everything
/// else in the file is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Package name, possibly scoped (`@scope/name`)
    #[serde(default)]
    pub name: String,

    /// Package version
    #[serde(default)]
    pub version: Option<String>,

    /// Whether the package is private (never published)
    #[serde(default)]
    pub private: bool,

    /// Package author
    #[serde(default)]
    pub author: Option<Author>,

    /// Source repository
    #[serde(default)]
    pub repository: Option<RepositoryField>,
}

/// Workspace marker file schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMarker {
    /// Shared baseline version of the workspace
    pub version: String,

    /// Glob patterns locating the sub-packages
    #[serde(default = "default_package_globs")]
    pub packages: Vec<String>,
}

fn default_package_globs() -> Vec<String> {
    vec!["packages/*".to_string()]
}

/// A package in a workspace snapshot, identified by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Current version, if the manifest declares one
    pub version: Option<String>,
    /// Whether this is a private package
    pub private: bool,
    /// Directory containing the manifest
    pub path: PathBuf,
}

impl Package {
    /// Create new package info
    pub fn new(name: impl Into<String>, version: Option<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version,
            private: false,
            path: path.into(),
        }
    }

    /// Set whether private
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Whether this package takes part in releases
    pub fn is_releasable(&self) -> bool {
        !self.private && self.version.is_some()
    }
}

/// A commit headed for the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogCommit {
    /// Full commit hash, the commit's identity
    pub hash: String,
    /// Commit subject line
    pub subject: String,
}

impl ChangelogCommit {
    /// Create a changelog commit
    pub fn new(hash: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
        }
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.len(), |(i, _)| i);
        &self.hash[..end]
    }
}

/// Repository descriptor (`owner/repo`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Repository owner or organization
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl std::fmt::Display for RepositoryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
