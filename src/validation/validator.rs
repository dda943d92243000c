//! Package age validation
//!
//! Fetches registry metadata per package, resolves the requested version,
//! and compares its age to the configured minimum. Every failure is
//! fail-closed: a package whose state cannot be determined is invalid.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{ConfigSource, FETCH_STAGGER_DELAY_MS, GateConfig};
use crate::manifest::Manifest;
use crate::validation::error::ProjectError;
use crate::validation::reporter::{Reporter, TracingReporter};
use crate::validation::result::{FailedPackage, Outcome, ValidationResult};
use crate::version::age::{AgeCalculator, SystemClock};
use crate::version::registries::NpmRegistry;
use crate::version::registry::Registry;
use crate::version::resolve::{resolve_version, versions_descending};
use crate::version::types::{LATEST, PackageSpec, RegistryMetadata};

/// Result of checking one package, keeping the metadata for the suggestion search
struct Check {
    outcome: Outcome,
    metadata: Option<RegistryMetadata>,
    minimum_age_days: i64,
}

pub struct PackageValidator {
    registry: Arc<dyn Registry>,
    config: Arc<dyn ConfigSource>,
    age_calculator: Arc<dyn AgeCalculator>,
    reporter: Arc<dyn Reporter>,
}

impl PackageValidator {
    pub fn new(
        registry: Arc<dyn Registry>,
        config: Arc<dyn ConfigSource>,
        age_calculator: Arc<dyn AgeCalculator>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            registry,
            config,
            age_calculator,
            reporter,
        }
    }

    /// Validator against the configured npm registry using the system clock
    pub fn from_config(config: GateConfig) -> Self {
        let registry = NpmRegistry::with_timeout(&config.registry_url, config.fetch_timeout);
        Self::new(
            Arc::new(registry),
            Arc::new(config),
            Arc::new(SystemClock),
            Arc::new(TracingReporter),
        )
    }

    /// Check whether the requested version of a package is old enough.
    ///
    /// `None` and `"latest"` check the latest dist-tag. Fetch failures and
    /// unknown versions return `false`.
    pub async fn validate_package(&self, name: &str, requested_version: Option<&str>) -> bool {
        self.check(name, requested_version).await.outcome.is_passed()
    }

    /// Validate every spec, fetching concurrently.
    ///
    /// Failed packages are reported in input order, each with the most recent
    /// version across the whole package that satisfies the minimum age.
    pub async fn validate_packages(&self, specs: &[PackageSpec]) -> ValidationResult {
        debug!("Validating {} package(s)", specs.len());

        let checks = specs.iter().enumerate().map(|(i, spec)| {
            let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
            async move {
                sleep(delay).await;
                self.validate_spec(spec).await
            }
        });

        let failed_packages = join_all(checks).await.into_iter().flatten().collect();
        ValidationResult::new(failed_packages)
    }

    /// Validate every dependency declared in the project's package.json.
    ///
    /// All dependencies are checked before deciding. Any failure, including a
    /// missing or malformed manifest, is returned as a fatal [`ProjectError`].
    pub async fn validate_all_packages_in_project(
        &self,
        project_dir: &Path,
    ) -> Result<ValidationResult, ProjectError> {
        let manifest = Manifest::load(project_dir)?;
        let specs = manifest.package_specs();

        info!(
            "Validating package age (minimum: {} days)",
            self.config.minimum_age_days()
        );

        let result = self.validate_packages(&specs).await;
        if !result.is_valid() {
            return Err(ProjectError::PackagesTooRecent(result));
        }

        info!("All packages meet the minimum age requirement");
        Ok(result)
    }

    /// Decide a package against an already-fetched metadata snapshot
    pub fn evaluate(
        &self,
        requested_version: Option<&str>,
        metadata: &RegistryMetadata,
        minimum_age_days: i64,
    ) -> Outcome {
        let version = resolve_version(requested_version, metadata);

        if !metadata.has_version(&version) {
            return Outcome::VersionNotFound { version };
        }

        let Some(published) = metadata.published_at(&version) else {
            return Outcome::MissingPublishTime { version };
        };

        let age_days = self.age_calculator.calculate_age(published);
        if age_days >= minimum_age_days {
            Outcome::Passed { version, age_days }
        } else {
            Outcome::TooRecent { version, age_days }
        }
    }

    /// Most recent version, by numeric ordering, that is at least `minimum_age_days` old
    pub fn suggest_version(
        &self,
        metadata: &RegistryMetadata,
        minimum_age_days: i64,
    ) -> Option<String> {
        versions_descending(metadata)
            .into_iter()
            .find(|version| {
                metadata.published_at(version).is_some_and(|published| {
                    self.age_calculator.calculate_age(published) >= minimum_age_days
                })
            })
            .map(str::to_string)
    }

    async fn validate_spec(&self, spec: &PackageSpec) -> Option<FailedPackage> {
        let check = self
            .check(&spec.name, Some(spec.requested_version.as_str()))
            .await;

        if check.outcome.is_passed() {
            return None;
        }

        let suggested_version = check
            .metadata
            .as_ref()
            .and_then(|metadata| self.suggest_version(metadata, check.minimum_age_days));
        self.reporter.suggestion(
            &spec.name,
            suggested_version.as_deref(),
            check.minimum_age_days,
        );

        Some(FailedPackage {
            name: spec.name.clone(),
            requested_version: spec.requested_version.clone(),
            suggested_version,
        })
    }

    async fn check(&self, name: &str, requested_version: Option<&str>) -> Check {
        let fetched = self.registry.fetch_metadata(name).await;
        let minimum_age_days = self.config.minimum_age_days();

        let (outcome, metadata) = match fetched {
            Ok(metadata) => (
                self.evaluate(requested_version, &metadata, minimum_age_days),
                Some(metadata),
            ),
            Err(e) => (
                Outcome::FetchFailed {
                    reason: e.to_string(),
                },
                None,
            ),
        };

        self.reporter.outcome(
            name,
            requested_version.unwrap_or(LATEST),
            &outcome,
            minimum_age_days,
        );

        Check {
            outcome,
            metadata,
            minimum_age_days,
        }
    }
}
