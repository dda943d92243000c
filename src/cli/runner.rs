//! Forwarding to the real package manager

use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::cli::detector::PackageManager;

/// Run the package manager with `args`, inheriting stdio, and return its exit code.
///
/// A child terminated by a signal reports exit code 1.
pub async fn run_package_manager(manager: PackageManager, args: &[String]) -> std::io::Result<i32> {
    info!("Running {} {}", manager.as_str(), args.join(" "));

    let status = Command::new(manager.as_str())
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    Ok(status.code().unwrap_or(1))
}
