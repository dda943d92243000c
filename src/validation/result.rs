//! Validation outcomes

/// A package that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPackage {
    pub name: String,
    pub requested_version: String,
    /// Most recent version old enough to install instead, if any
    pub suggested_version: Option<String>,
}

/// Aggregated result of validating a batch of packages
///
/// `is_valid()` is true exactly when no package failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    failed_packages: Vec<FailedPackage>,
}

impl ValidationResult {
    pub fn new(failed_packages: Vec<FailedPackage>) -> Self {
        Self { failed_packages }
    }

    pub fn is_valid(&self) -> bool {
        self.failed_packages.is_empty()
    }

    /// Failed packages in the order their specs were given
    pub fn failed_packages(&self) -> &[FailedPackage] {
        &self.failed_packages
    }
}

/// Decision for a single package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Resolved version is at least the minimum age
    Passed { version: String, age_days: i64 },
    /// Resolved version was published too recently
    TooRecent { version: String, age_days: i64 },
    /// Resolved version is not in the registry metadata
    VersionNotFound { version: String },
    /// Resolved version has no usable publish timestamp
    MissingPublishTime { version: String },
    /// Metadata could not be fetched or parsed
    FetchFailed { reason: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed { .. })
    }
}
