//! Registry trait for fetching package metadata from various sources

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::RegistryMetadata;

/// Trait for fetching package metadata from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches the version and publish-time metadata for a package
    ///
    /// Every call is a fresh round trip; implementations must not cache.
    ///
    /// # Arguments
    /// * `package_name` - The name of the package (e.g., "lodash", "@types/node")
    ///
    /// # Returns
    /// * `Ok(RegistryMetadata)` - Snapshot of the package's versions and publish times
    /// * `Err(RegistryError)` - If the fetch fails or the body is not metadata JSON
    async fn fetch_metadata(&self, package_name: &str) -> Result<RegistryMetadata, RegistryError>;
}
