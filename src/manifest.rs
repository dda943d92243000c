//! package.json reading
//!
//! Dependencies from `dependencies`, `devDependencies` and `peerDependencies`
//! are merged into one name -> range mapping. Later groups override earlier
//! ones on name collision while keeping the position of the first declaration.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::version::types::{LATEST, PackageSpec};

pub const MANIFEST_FILE_NAME: &str = "package.json";

static RANGE_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(>=|<=|\^|~|>|<|=)").expect("valid range operator pattern"));

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{0} not found")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Dependency sections of a package.json
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    pub dependencies: IndexMap<String, String>,
    pub dev_dependencies: IndexMap<String, String>,
    pub peer_dependencies: IndexMap<String, String>,
}

impl Manifest {
    /// Read `package.json` from `dir`
    pub fn load(dir: &Path) -> Result<Self, ManifestError> {
        let path = dir.join(MANIFEST_FILE_NAME);
        if !path.exists() {
            return Err(ManifestError::NotFound(path));
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ManifestError::Invalid { path, source })
    }

    /// Regular, dev and peer dependencies merged in that order
    pub fn merged_dependencies(&self) -> IndexMap<String, String> {
        let mut merged = IndexMap::new();
        for group in [
            &self.dependencies,
            &self.dev_dependencies,
            &self.peer_dependencies,
        ] {
            for (name, range) in group {
                merged.insert(name.clone(), range.clone());
            }
        }
        merged
    }

    /// Package specs for every merged dependency, in declaration order
    pub fn package_specs(&self) -> Vec<PackageSpec> {
        self.merged_dependencies()
            .iter()
            .map(|(name, range)| declared_spec(name, range))
            .collect()
    }
}

/// Turn a declared dependency into the spec to validate.
///
/// Ranges are not resolved: any declaration with a leading operator is
/// checked against "latest". A bare version is checked exactly.
pub fn declared_spec(name: &str, range: &str) -> PackageSpec {
    match parse_npm_alias(range) {
        Some((real_name, version)) => PackageSpec::new(real_name, requested_version(&version)),
        None => PackageSpec::new(name, requested_version(range)),
    }
}

fn requested_version(range: &str) -> String {
    // An empty range means any version
    if range.trim().is_empty() || RANGE_OPERATOR.is_match(range) {
        LATEST.to_string()
    } else {
        range.to_string()
    }
}

/// Parse npm alias format: npm:package@version or npm:@scope/package@version
/// Returns (actual_package_name, version)
fn parse_npm_alias(value: &str) -> Option<(String, String)> {
    let rest = value.strip_prefix("npm:")?;

    // Skip the scope marker so the version separator is the first '@' left
    let search_from = usize::from(rest.starts_with('@'));
    match rest[search_from..].find('@') {
        Some(at_pos) => {
            let at_pos = search_from + at_pos;
            Some((rest[..at_pos].to_string(), rest[at_pos + 1..].to_string()))
        }
        None => Some((rest.to_string(), LATEST.to_string())),
    }
}
