//! Release dispatch by repository mode

use std::time::Instant;

use tracing::{info, instrument};

use crate::error::Result;
use crate::traits::ReleaseDispatcher;
use crate::types::RepositoryMode;

/// Selects and runs the release procedure matching the repository mode
///
/// Each step runs only after the previous one succeeded. A failure is
/// returned as-is and steps that already ran are left in place.
pub struct PublishOrchestrator<'a> {
    dispatcher: &'a dyn ReleaseDispatcher,
}

impl<'a> PublishOrchestrator<'a> {
    /// Create an orchestrator over a dispatcher
    pub fn new(dispatcher: &'a dyn ReleaseDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Release `version`
    #[instrument(skip(self))]
    pub async fn publish(&self, mode: RepositoryMode, version: &str) -> Result<()> {
        let start = Instant::now();

        match mode {
            RepositoryMode::Workspace => {
                self.dispatcher.publish_workspace(version).await?;
            }
            RepositoryMode::Single => {
                self.dispatcher.publish_single(version).await?;
                self.dispatcher.push_tags().await?;
            }
        }

        info!(
            mode = %mode,
            version,
            duration_ms = start.elapsed().as_millis() as u64,
            "release published"
        );
        Ok(())
    }
}
