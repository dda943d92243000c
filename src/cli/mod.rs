//! CLI boundary around the validation engine
//!
//! - [`args`]: Extracting package specs from package-manager arguments
//! - [`detector`]: Choosing the package manager to forward to
//! - [`runner`]: Spawning the package manager

pub mod args;
pub mod detector;
pub mod runner;

pub use detector::PackageManager;
