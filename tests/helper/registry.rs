//! Registry test utilities

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use ggpm::config::GateConfig;
use ggpm::validation::{PackageValidator, TracingReporter};
use ggpm::version::age::FixedClock;
use ggpm::version::error::RegistryError;
use ggpm::version::registry::Registry;
use ggpm::version::types::RegistryMetadata;

/// Fixed "now" shared by all integration tests
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> String {
    (now() - chrono::Duration::days(days)).to_rfc3339()
}

/// Metadata whose versions were published `age` days before [`now`]
pub fn metadata(latest: &str, versions: &[(&str, i64)]) -> RegistryMetadata {
    versions
        .iter()
        .fold(RegistryMetadata::new(latest), |meta, (version, age)| {
            meta.with_version(version, &days_ago(*age))
        })
}

/// In-memory registry with per-package latency
#[derive(Default)]
pub struct FakeRegistry {
    packages: HashMap<String, (RegistryMetadata, Duration)>,
    completed: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(self, name: &str, metadata: RegistryMetadata) -> Self {
        self.with_delayed_package(name, metadata, Duration::ZERO)
    }

    pub fn with_delayed_package(
        mut self,
        name: &str,
        metadata: RegistryMetadata,
        delay: Duration,
    ) -> Self {
        self.packages.insert(name.to_string(), (metadata, delay));
        self
    }

    /// Package names in the order their fetches finished
    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registry for FakeRegistry {
    async fn fetch_metadata(&self, package_name: &str) -> Result<RegistryMetadata, RegistryError> {
        let result = match self.packages.get(package_name) {
            Some((metadata, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(metadata.clone())
            }
            None => Err(RegistryError::NotFound(package_name.to_string())),
        };
        self.completed.lock().unwrap().push(package_name.to_string());
        result
    }
}

/// Validator over `registry` pinned to [`now`]
pub fn create_test_validator(registry: Arc<dyn Registry>, minimum_age_days: i64) -> PackageValidator {
    PackageValidator::new(
        registry,
        Arc::new(GateConfig::with_minimum_age_days(minimum_age_days)),
        Arc::new(FixedClock(now())),
        Arc::new(TracingReporter),
    )
}
