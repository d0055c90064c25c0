//! Previous release version resolution

use tracing::{debug, info, instrument, warn};

use crate::config::UnpublishedPolicy;
use crate::error::{ConfigError, LaunchpadError, RegistryError, Result};
use crate::traits::{ManifestReader, NormalizeFn, RegistryClient};
use crate::types::{Package, RepositoryMode};
use crate::version::{parse_loose, VersionCandidate, LOWEST_VERSION};

/// Resolves the version the next release is compared against
///
/// Reconciles the version recorded in the repository with the latest
/// version published to the registry; the greater one wins and the
/// registry wins ties.
pub struct VersionResolver<'a> {
    manifests: &'a dyn ManifestReader,
    registry: &'a dyn RegistryClient,
    on_unpublished: UnpublishedPolicy,
    tag_prefix: String,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver over the given collaborators
    pub fn new(manifests: &'a dyn ManifestReader, registry: &'a dyn RegistryClient) -> Self {
        Self {
            manifests,
            registry,
            on_unpublished: UnpublishedPolicy::default(),
            tag_prefix: String::new(),
        }
    }

    /// Set the prefix `normalize` prepends, so comparisons can see past it
    pub fn with_tag_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tag_prefix = prefix.into();
        self
    }

    /// Set the policy for packages the registry has never seen
    pub fn with_unpublished_policy(mut self, policy: UnpublishedPolicy) -> Self {
        self.on_unpublished = policy;
        self
    }

    /// Compute the previous release version
    ///
    /// Returns `None` only in single mode when there is no root manifest or
    /// it declares no version.
    #[instrument(skip(self, normalize))]
    pub async fn resolve_previous_version(
        &self,
        mode: RepositoryMode,
        normalize: &NormalizeFn<'_>,
    ) -> Result<Option<String>> {
        match mode {
            RepositoryMode::Single => self.resolve_single(normalize).await,
            RepositoryMode::Workspace => self.resolve_workspace(normalize).await.map(Some),
        }
    }

    async fn resolve_single(&self, normalize: &NormalizeFn<'_>) -> Result<Option<String>> {
        let Some(manifest) = self.manifests.root_manifest().await? else {
            debug!("no root manifest, previous version unset");
            return Ok(None);
        };

        let Some(version) = manifest.version.as_deref() else {
            debug!(package = %manifest.name, "root manifest has no version");
            return Ok(None);
        };

        if manifest.name.is_empty() {
            return Err(ConfigError::MissingField("name".to_string()).into());
        }

        let local = normalize(version);
        let resolved = self.against_registry(&manifest.name, local, normalize).await?;
        info!(package = %manifest.name, previous_version = %resolved, "resolved previous version");
        Ok(Some(resolved))
    }

    async fn resolve_workspace(&self, normalize: &NormalizeFn<'_>) -> Result<String> {
        let marker = self.manifests.workspace_marker().await?;
        let baseline = normalize(&marker.version);

        let packages = self.manifests.workspace_packages().await?;
        let Some(released) = released_package(&packages)? else {
            info!(baseline = %baseline, "no released workspace package, using baseline");
            return Ok(baseline);
        };

        debug!(
            package = %released.name,
            version = ?released.version,
            "selected released package"
        );

        let resolved = self.against_registry(&released.name, baseline, normalize).await?;
        info!(package = %released.name, previous_version = %resolved, "resolved previous version");
        Ok(resolved)
    }

    /// Compare an already normalized local version with the registry's latest
    async fn against_registry(
        &self,
        name: &str,
        local: String,
        normalize: &NormalizeFn<'_>,
    ) -> Result<String> {
        let published = match self.registry.latest_version(name).await {
            Ok(version) => version,
            Err(LaunchpadError::Registry(RegistryError::NotPublished(_)))
                if self.on_unpublished == UnpublishedPolicy::Baseline =>
            {
                warn!(package = name, local = %local, "package not published, keeping local version");
                return Ok(local);
            }
            Err(e) => return Err(e),
        };

        let candidate =
            VersionCandidate::new(local, normalize(&published)).with_prefix(&self.tag_prefix);
        let winner = candidate.resolve()?.to_string();
        debug!(
            package = name,
            local = %candidate.local,
            registry = %candidate.registry,
            winner = %winner,
            "compared local and registry versions"
        );
        Ok(winner)
    }
}

/// The public, versioned package with the greatest version
///
/// Packages must be strictly greater than `0.0.0` to be picked.
pub fn released_package(packages: &[Package]) -> Result<Option<&Package>> {
    let mut greatest = LOWEST_VERSION;
    let mut released = None;

    for package in packages.iter().filter(|p| p.is_releasable()) {
        let Some(version) = package.version.as_deref() else {
            continue;
        };

        let parsed = parse_loose(version)?;
        if parsed > greatest {
            greatest = parsed;
            released = Some(package);
        }
    }

    Ok(released)
}
