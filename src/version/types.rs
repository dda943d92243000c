//! Common types for the version layer

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Version requested when the caller names none
pub const LATEST: &str = "latest";

/// A package under consideration together with the version the caller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Package name (e.g., "lodash", "@types/node")
    pub name: String,
    /// Requested version: an exact version, a bare major token, or "latest"
    pub requested_version: String,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>, requested_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requested_version: requested_version.into(),
        }
    }

    /// Spec asking for whatever the registry tags as latest
    pub fn latest(name: impl Into<String>) -> Self {
        Self::new(name, LATEST)
    }
}

/// Per-version entry of the registry document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionMeta {
    #[serde(default)]
    pub time: Option<String>,
}

/// Snapshot of a package's registry metadata
///
/// Fetched once per package per validation call and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryMetadata {
    /// Version the "latest" dist-tag points to
    pub latest_tag: String,
    /// Known versions with their per-version metadata
    pub versions: HashMap<String, VersionMeta>,
    /// Top-level publish time mapping (version -> ISO 8601 timestamp)
    pub time: HashMap<String, String>,
}

impl RegistryMetadata {
    pub fn new(latest_tag: impl Into<String>) -> Self {
        Self {
            latest_tag: latest_tag.into(),
            ..Default::default()
        }
    }

    /// Adds a version whose publish time is recorded in the top-level time mapping
    pub fn with_version(mut self, version: &str, published: &str) -> Self {
        self.versions.insert(version.to_string(), VersionMeta::default());
        self.time.insert(version.to_string(), published.to_string());
        self
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    pub fn version_names(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    /// Publish time of a version
    ///
    /// The per-version `time` field wins over the top-level mapping. Returns
    /// `None` when neither is present or the timestamp is not RFC 3339.
    pub fn published_at(&self, version: &str) -> Option<DateTime<Utc>> {
        let raw = self
            .versions
            .get(version)
            .and_then(|meta| meta.time.as_deref())
            .or_else(|| self.time.get(version).map(String::as_str))?;

        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
