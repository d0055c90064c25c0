//! npm registry lookups

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use launchpad_core::error::{CommandError, LaunchpadError, RegistryError, Result};
use launchpad_core::traits::RegistryClient;
use launchpad_core::version::parse_loose;

use crate::command::{CommandRunner, CommandSpec};

/// Registry client backed by `npm view`
pub struct NpmRegistry {
    runner: Arc<dyn CommandRunner>,
    registry_url: Option<String>,
}

impl NpmRegistry {
    /// Create a client using the npm default registry
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            registry_url: None,
        }
    }

    /// Query a custom registry instead of the default one
    pub fn with_registry_url(mut self, url: Option<String>) -> Self {
        self.registry_url = url;
        self
    }

    fn view_command(&self, name: &str) -> CommandSpec {
        let cmd = CommandSpec::new("npm").args(["view", name, "version"]);
        match &self.registry_url {
            Some(url) => cmd.arg("--registry").arg(url),
            None => cmd,
        }
    }
}

fn is_not_found(stderr: &str) -> bool {
    stderr.contains("E404") || stderr.contains("404 Not Found")
}

#[async_trait]
impl RegistryClient for NpmRegistry {
    #[instrument(skip(self))]
    async fn latest_version(&self, name: &str) -> Result<String> {
        let output = match self.runner.run(&self.view_command(name)).await {
            Ok(output) => output,
            Err(LaunchpadError::Command(CommandError::Failed { stderr, .. })) => {
                return Err(if is_not_found(&stderr) {
                    RegistryError::NotPublished(name.to_string())
                } else {
                    RegistryError::LookupFailed {
                        package: name.to_string(),
                        reason: stderr,
                    }
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        // `npm view` prints nothing for a name with no published versions
        let version = output.trim().trim_matches(|c| c == '"' || c == '\'');
        if version.is_empty() {
            return Err(RegistryError::NotPublished(name.to_string()).into());
        }

        if parse_loose(version).is_err() {
            return Err(RegistryError::InvalidResponse {
                package: name.to_string(),
                output,
            }
            .into());
        }

        debug!(package = name, version, "found published version");
        Ok(version.to_string())
    }
}
