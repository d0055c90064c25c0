//! package.json and lerna.json loading

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use launchpad_core::error::{ConfigError, Result};
use launchpad_core::types::{Manifest, WorkspaceMarker};

/// Package manifest file name
pub const MANIFEST_FILE: &str = "package.json";

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::Io(e).into()),
    };

    let parsed = serde_json::from_str(&content).map_err(|e| ConfigError::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), "loaded manifest");
    Ok(Some(parsed))
}

/// Load a package manifest, `None` when the file does not exist
pub async fn load_manifest(path: &Path) -> Result<Option<Manifest>> {
    read_json(path).await
}

/// Load the workspace marker file, which must exist
pub async fn load_marker(path: &Path) -> Result<WorkspaceMarker> {
    read_json(path)
        .await?
        .ok_or_else(|| ConfigError::NotFound(path.to_path_buf()).into())
}
