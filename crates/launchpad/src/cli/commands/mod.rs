//! CLI commands

mod changelog;
mod info;
mod init;
mod mode;
mod previous_version;
mod publish;

pub use changelog::ChangelogCommand;
pub use info::InfoCommand;
pub use init::InitCommand;
pub use mode::ModeCommand;
pub use previous_version::PreviousVersionCommand;
pub use publish::PublishCommand;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use launchpad_core::config::{load_config_or_default, Config};
use launchpad_core::extensions::ExtensionRegistry;
use launchpad_core::types::RepositoryMode;
use launchpad_git::{GitRepo, GitWorkdir};
use launchpad_npm::{NpmPlugin, ProcessRunner};

/// Everything a command needs to talk to the repository
pub(crate) struct ReleaseContext {
    /// Repository root (git work tree, or the current directory outside git)
    pub root: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub mode: RepositoryMode,
    pub extensions: ExtensionRegistry,
}

impl ReleaseContext {
    /// Load config and wire up the npm plugin for `cwd`
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let (config, config_path) = load_config_or_default(cwd)?;
        Self::with_config(cwd, config, config_path)
    }

    /// Wire up the npm plugin with an already loaded config
    pub fn with_config(
        cwd: &Path,
        config: Config,
        config_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let (root, branch) = match GitRepo::discover(cwd) {
            Ok(repo) => {
                let branch = repo.current_branch()?;
                (repo.path().to_path_buf(), branch)
            }
            Err(e) => {
                warn!(error = %e, "not inside a git repository");
                (cwd.to_path_buf(), None)
            }
        };

        let plugin = NpmPlugin::from_config(
            &root,
            &config,
            Arc::new(ProcessRunner::new(&root)),
            Arc::new(GitWorkdir::new(&root)),
            branch,
        );
        let mode = plugin.mode();
        debug!(root = %root.display(), mode = %mode, "release context ready");

        let mut extensions = ExtensionRegistry::new();
        extensions.register(Arc::new(plugin));

        Ok(Self {
            root,
            config,
            config_path,
            mode,
            extensions,
        })
    }

    /// Prefix a version the way tags are written
    pub fn normalize(&self, version: &str) -> String {
        self.config.versioning.prefix(version)
    }
}
