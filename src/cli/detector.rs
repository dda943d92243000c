//! Package manager selection

use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use clap::ValueEnum;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Executable name of the package manager
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Package manager implied by the wrapper binary name (`gnpm`, `gpnpm`, ...)
    ///
    /// `ggpm` and unknown names return `None` and fall back to detection.
    pub fn from_wrapper_name(name: &str) -> Option<Self> {
        name.strip_prefix('g').and_then(|rest| rest.parse().ok())
    }
}

impl FromStr for PackageManager {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(()),
        }
    }
}

/// Lockfiles checked in order, first match wins
const LOCK_FILES: [(&str, PackageManager); 3] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
];

/// Installed managers checked, in order, when no lockfile is present
const PREFERRED_MANAGERS: [PackageManager; 2] = [PackageManager::Pnpm, PackageManager::Npm];

/// Detect the package manager for the project in `dir`
///
/// Lockfiles decide first, then the first installed preferred manager,
/// then npm.
pub async fn detect(dir: &Path) -> PackageManager {
    if let Some(manager) = detect_from_lock_files(dir) {
        debug!("Detected {} from lockfile", manager.as_str());
        return manager;
    }

    let mut installed = Vec::new();
    for manager in PREFERRED_MANAGERS {
        if is_installed(manager).await {
            installed.push(manager);
        }
    }
    first_preferred(&installed)
}

fn first_preferred(installed: &[PackageManager]) -> PackageManager {
    PREFERRED_MANAGERS
        .into_iter()
        .find(|manager| installed.contains(manager))
        .unwrap_or(PackageManager::Npm)
}

fn detect_from_lock_files(dir: &Path) -> Option<PackageManager> {
    LOCK_FILES
        .iter()
        .find(|(lock_file, _)| dir.join(lock_file).exists())
        .map(|(_, manager)| *manager)
}

/// Whether `<manager> --version` runs successfully
pub async fn is_installed(manager: PackageManager) -> bool {
    Command::new(manager.as_str())
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .is_ok_and(|status| status.success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("gnpm", Some(PackageManager::Npm))]
    #[case("gpnpm", Some(PackageManager::Pnpm))]
    #[case("gyarn", Some(PackageManager::Yarn))]
    #[case("gbun", Some(PackageManager::Bun))]
    #[case("ggpm", None)]
    #[case("npm", None)]
    fn from_wrapper_name_returns_expected(
        #[case] name: &str,
        #[case] expected: Option<PackageManager>,
    ) {
        assert_eq!(PackageManager::from_wrapper_name(name), expected);
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&["pnpm-lock.yaml"], Some(PackageManager::Pnpm))]
    #[case(&["yarn.lock"], Some(PackageManager::Yarn))]
    #[case(&["bun.lockb"], Some(PackageManager::Bun))]
    #[case(&["yarn.lock", "pnpm-lock.yaml"], Some(PackageManager::Pnpm))]
    fn detect_from_lock_files_returns_expected(
        #[case] files: &[&str],
        #[case] expected: Option<PackageManager>,
    ) {
        let temp_dir = TempDir::new().unwrap();
        for file in files {
            std::fs::write(temp_dir.path().join(file), "").unwrap();
        }

        assert_eq!(detect_from_lock_files(temp_dir.path()), expected);
    }

    #[tokio::test]
    async fn detect_prefers_lock_file_over_installed_managers() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("yarn.lock"), "").unwrap();

        assert_eq!(detect(temp_dir.path()).await, PackageManager::Yarn);
    }

    #[rstest]
    #[case(&[PackageManager::Npm], PackageManager::Npm)]
    #[case(&[PackageManager::Npm, PackageManager::Pnpm], PackageManager::Pnpm)]
    #[case(&[PackageManager::Pnpm], PackageManager::Pnpm)]
    #[case(&[], PackageManager::Npm)]
    fn first_preferred_returns_expected(
        #[case] installed: &[PackageManager],
        #[case] expected: PackageManager,
    ) {
        assert_eq!(first_preferred(installed), expected);
    }
}
