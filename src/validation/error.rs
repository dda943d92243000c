use thiserror::Error;

use crate::manifest::ManifestError;
use crate::validation::result::ValidationResult;

/// Fatal outcomes of a project-wide validation run
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{} package(s) do not meet the minimum age requirement", .0.failed_packages().len())]
    PackagesTooRecent(ValidationResult),
}
