//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_workspace(config)?;
    validate_versioning(config)?;
    validate_publish(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn validate_workspace(config: &Config) -> Result<()> {
    if config.workspace.marker_file.trim().is_empty() {
        return Err(invalid("workspace.marker_file", "marker file cannot be empty").into());
    }

    let packages_dir = config.workspace.packages_dir.trim();
    if packages_dir.is_empty() {
        return Err(invalid("workspace.packages_dir", "packages directory cannot be empty").into());
    }
    if packages_dir.contains('/') {
        return Err(invalid(
            "workspace.packages_dir",
            "must be a single top-level directory name",
        )
        .into());
    }

    Ok(())
}

fn validate_versioning(config: &Config) -> Result<()> {
    let prefix = &config.versioning.tag_prefix;
    if prefix.chars().any(char::is_whitespace) {
        return Err(invalid("versioning.tag_prefix", "cannot contain whitespace").into());
    }
    if prefix.ends_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("versioning.tag_prefix", "cannot end with a digit").into());
    }

    Ok(())
}

fn validate_publish(config: &Config) -> Result<()> {
    if config.publish.remote.trim().is_empty() {
        return Err(invalid("publish.remote", "remote cannot be empty").into());
    }

    if config.publish.lerna_command.trim().is_empty() {
        return Err(invalid("publish.lerna_command", "lerna command cannot be empty").into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.concurrency == 0 {
        return Err(invalid("changelog.concurrency", "must be at least 1").into());
    }

    Ok(())
}
