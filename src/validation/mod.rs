//! Package age validation engine
//!
//! # Modules
//!
//! - [`validator`]: `PackageValidator`, the orchestrator over registry, config and clock
//! - [`result`]: Per-package outcomes and the aggregated `ValidationResult`
//! - [`reporter`]: Reporting port for validation decisions
//! - [`error`]: Fatal project-level errors

pub mod error;
pub mod reporter;
pub mod result;
pub mod validator;

pub use error::ProjectError;
pub use reporter::{Reporter, TracingReporter};
pub use result::{FailedPackage, Outcome, ValidationResult};
pub use validator::PackageValidator;
