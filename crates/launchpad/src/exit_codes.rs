//! Exit codes for the CLI

use launchpad_core::error::LaunchpadError;

/// General error
pub const ERROR: i32 = 1;

/// Configuration, manifest or marker file error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Registry lookup error
pub const REGISTRY_ERROR: i32 = 5;

/// External command failed
pub const COMMAND_ERROR: i32 = 6;

/// Exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<LaunchpadError>() {
        Some(LaunchpadError::Config(_)) => CONFIG_ERROR,
        Some(LaunchpadError::Git(_)) => GIT_ERROR,
        Some(LaunchpadError::Version(_)) => VERSION_ERROR,
        Some(LaunchpadError::Registry(_)) => REGISTRY_ERROR,
        Some(LaunchpadError::Command(_)) => COMMAND_ERROR,
        _ => ERROR,
    }
}
