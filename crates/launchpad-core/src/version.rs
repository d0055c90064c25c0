//! Semantic version comparison helpers

use semver::Version;

use crate::error::{Result, VersionError};

/// The sentinel "lowest possible version"
pub const LOWEST_VERSION: Version = Version::new(0, 0, 0);

/// Parse a version leniently, accepting a leading `v` or `=` and surrounding whitespace
pub fn parse_loose(version: &str) -> Result<Version> {
    let trimmed = version.trim();
    let bare = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);

    Version::parse(bare)
        .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()).into())
}

/// Parse a version that may carry `prefix` (e.g. a tag prefix like `release-`)
pub fn parse_prefixed(version: &str, prefix: &str) -> Result<Version> {
    let trimmed = version.trim();
    match trimmed.strip_prefix(prefix) {
        Some(bare) if !prefix.is_empty() => Version::parse(bare)
            .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()).into()),
        _ => parse_loose(trimmed),
    }
}

/// A local and a registry version, both already normalized the same way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCandidate {
    /// Version recorded in the repository
    pub local: String,
    /// Latest version published to the registry
    pub registry: String,
    /// Prefix both sides carry, stripped before comparison
    pub prefix: String,
}

impl VersionCandidate {
    /// Create a candidate pair
    pub fn new(local: impl Into<String>, registry: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            registry: registry.into(),
            prefix: String::new(),
        }
    }

    /// Set the prefix stripped before comparison
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Pick the winner: local only if strictly greater, registry otherwise
    pub fn resolve(&self) -> Result<&str> {
        let local = parse_prefixed(&self.local, &self.prefix)?;
        let registry = parse_prefixed(&self.registry, &self.prefix)?;

        if local > registry {
            Ok(&self.local)
        } else {
            Ok(&self.registry)
        }
    }
}
