//! npm registry API implementation

use std::collections::HashMap;
use std::time::Duration;

use crate::config::{DEFAULT_REGISTRY_URL, FETCH_TIMEOUT_MS};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::{RegistryMetadata, VersionMeta};
use serde::Deserialize;
use tracing::{debug, warn};

/// Response from npm registry API
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags")]
    dist_tags: HashMap<String, String>,
    versions: HashMap<String, VersionMeta>,
    #[serde(default)]
    time: HashMap<String, serde_json::Value>,
}

/// Registry implementation for npm registry API
#[derive(Clone)]
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL and the default timeout
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    /// Creates a new NpmRegistry whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("ggpm/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }

    fn parse_metadata(body: &str) -> Result<RegistryMetadata, RegistryError> {
        let response: NpmPackageResponse =
            serde_json::from_str(body).map_err(|e| RegistryError::Parse(e.to_string()))?;

        let latest_tag = response
            .dist_tags
            .get("latest")
            .cloned()
            .ok_or_else(|| RegistryError::Parse("missing dist-tags.latest".to_string()))?;

        // npm also stores "created" and "modified" here; non-string values are dropped.
        let time = response
            .time
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(ts) => Some((key, ts)),
                _ => None,
            })
            .collect();

        Ok(RegistryMetadata {
            latest_tag,
            versions: response.versions,
            time,
        })
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    async fn fetch_metadata(&self, package_name: &str) -> Result<RegistryMetadata, RegistryError> {
        let encoded_name = Self::encode_package_name(package_name);
        let url = format!("{}/{}", self.base_url, encoded_name);
        debug!("Fetching npm metadata: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(RegistryError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;

        Self::parse_metadata(&body).inspect_err(|e| {
            warn!("Failed to parse npm registry response for {}: {}", package_name, e);
        })
    }
}
