//! Error types for Launchpad

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LaunchpadError
pub type Result<T> = std::result::Result<T, LaunchpadError>;

/// Main error type for Launchpad operations
#[derive(Debug, Error)]
pub enum LaunchpadError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Registry lookup errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// External command errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
///
/// Covers the launchpad config file as well as package manifests and the
/// workspace marker file. All of them are fatal for the operation that
/// needed them.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration, manifest or marker file not found
    #[error("File not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse a package manifest or workspace marker
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Commit could not be resolved
    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    /// HEAD is detached or unborn
    #[error("Cannot determine current branch")]
    NoBranch,

    /// Tag pattern is not a valid regular expression
    #[error("Invalid tag pattern: {0}")]
    InvalidTagPattern(String),

    /// Background query task failed to complete
    #[error("Git query task failed: {0}")]
    TaskFailed(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Failed to parse version
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, String),
}

/// Registry lookup errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The package has never been published
    #[error("Package '{0}' has not been published to the registry")]
    NotPublished(String),

    /// The lookup itself failed
    #[error("Registry lookup for '{package}' failed: {reason}")]
    LookupFailed { package: String, reason: String },

    /// The registry answered with something that is not a version
    #[error("Registry returned an invalid version for '{package}': {output}")]
    InvalidResponse { package: String, output: String },
}

/// External command errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Program is not installed or not on PATH
    #[error("Required tool not found: {0}")]
    ToolNotFound(String),

    /// Command could not be started
    #[error("Failed to run `{command}`: {reason}")]
    SpawnFailed { command: String, reason: String },

    /// Command exited unsuccessfully
    #[error("Command `{command}` failed with exit code {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl LaunchpadError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Whether this is a configuration error (missing or malformed input files)
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_surfaces_stderr() {
        let err: LaunchpadError = CommandError::Failed {
            command: "npm publish".to_string(),
            code: Some(1),
            stderr: "E403 forbidden".to_string(),
        }
        .into();

        let message = err.to_string();
        assert!(message.contains("npm publish"));
        assert!(message.contains("E403 forbidden"));
    }

    #[test]
    fn test_is_config() {
        let err: LaunchpadError = ConfigError::NotFound(PathBuf::from("lerna.json")).into();
        assert!(err.is_config());
        assert!(!LaunchpadError::other("boom").is_config());
    }
}
