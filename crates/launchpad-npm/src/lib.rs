//! Launchpad npm - npm and lerna integration
//!
//! Reads `package.json` and `lerna.json` manifests, queries the npm
//! registry and runs the npm, lerna and git commands that perform a
//! release.

pub mod command;
pub mod dispatch;
pub mod manifest;
pub mod plugin;
pub mod registry;
pub mod repository;
pub mod workspace;

pub use command::{CommandRunner, CommandSpec, ProcessRunner};
pub use dispatch::NpmDispatcher;
pub use plugin::NpmPlugin;
pub use registry::NpmRegistry;
pub use repository::parse_repository;
pub use workspace::{detect_mode, NpmManifestReader};
