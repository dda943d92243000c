//! Reporting port for validation decisions
//!
//! Reporters only observe; the validator's return values decide what the
//! caller does.

use tracing::{error, info, warn};

use crate::validation::result::Outcome;

pub trait Reporter: Send + Sync {
    /// Called once per validated package with its decision
    fn outcome(&self, package: &str, requested: &str, outcome: &Outcome, minimum_age_days: i64);

    /// Called once per failed package after the replacement search
    fn suggestion(&self, package: &str, suggested: Option<&str>, minimum_age_days: i64);
}

/// Reporter that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn outcome(&self, package: &str, requested: &str, outcome: &Outcome, minimum_age_days: i64) {
        match outcome {
            Outcome::Passed { version, age_days } => info!(
                package,
                version = version.as_str(),
                age_days,
                "{} meets the minimum age requirement",
                package
            ),
            Outcome::TooRecent { version, age_days } => error!(
                package,
                version = version.as_str(),
                age_days,
                minimum_age_days,
                "{}@{} is too recent ({} days). Minimum required: {} days",
                package,
                version,
                age_days,
                minimum_age_days
            ),
            Outcome::VersionNotFound { version } => error!(
                package,
                version = version.as_str(),
                "Version {} not found for {}",
                requested,
                package
            ),
            Outcome::MissingPublishTime { version } => error!(
                package,
                version = version.as_str(),
                "{}@{} has no valid publish time",
                package,
                version
            ),
            Outcome::FetchFailed { reason } => {
                error!(package, "Error validating {}: {}", package, reason)
            }
        }
    }

    fn suggestion(&self, package: &str, suggested: Option<&str>, minimum_age_days: i64) {
        match suggested {
            Some(version) => info!(
                package,
                suggested = version,
                "{}@{} is at least {} days old",
                package,
                version,
                minimum_age_days
            ),
            None => warn!(
                package,
                "No version of {} is at least {} days old",
                package,
                minimum_age_days
            ),
        }
    }
}
