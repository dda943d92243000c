use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::version::resolve::parse_leading_integer;

// =============================================================================
// Defaults
// =============================================================================

/// Minimum release age in days when nothing else is configured
pub const DEFAULT_MINIMUM_AGE_DAYS: i64 = 7;

/// Public npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Delay between starting each fetch request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// Name of the key-value file holding the threshold
pub const CONFIG_FILE_NAME: &str = ".npmrc";

const MINIMUM_AGE_KEY: &str = "minimum-release-age=";
const REGISTRY_KEY: &str = "registry=";

/// Supplies the minimum-age threshold to the validation engine
///
/// Implementations never fail; anything unusable resolves to
/// [`DEFAULT_MINIMUM_AGE_DAYS`].
pub trait ConfigSource: Send + Sync {
    fn minimum_age_days(&self) -> i64;
}

/// Gate configuration, built once at startup and passed to every component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub minimum_age_days: i64,
    pub registry_url: String,
    pub fetch_timeout: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            minimum_age_days: DEFAULT_MINIMUM_AGE_DAYS,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            fetch_timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
        }
    }
}

impl ConfigSource for GateConfig {
    fn minimum_age_days(&self) -> i64 {
        self.minimum_age_days
    }
}

impl GateConfig {
    pub fn with_minimum_age_days(minimum_age_days: i64) -> Self {
        Self {
            minimum_age_days,
            ..Default::default()
        }
    }

    /// Load configuration from the `.npmrc` in `dir`
    ///
    /// A missing file or unreadable content falls back to defaults with a warning.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE_NAME);

        if !path.exists() {
            warn!(
                "{} not found, using default value: {} days",
                CONFIG_FILE_NAME, DEFAULT_MINIMUM_AGE_DAYS
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_npmrc(&content),
            Err(e) => {
                warn!(
                    "Error reading {:?}: {}, using default value: {} days",
                    path, e, DEFAULT_MINIMUM_AGE_DAYS
                );
                Self::default()
            }
        }
    }

    /// Build configuration from `.npmrc` content
    pub fn from_npmrc(content: &str) -> Self {
        let minimum_age_days = match parse_minimum_age(content) {
            Some(days) => {
                info!("Using minimum age from {}: {} days", CONFIG_FILE_NAME, days);
                days
            }
            None => {
                warn!(
                    "minimum-release-age not found in {}, using default value: {} days",
                    CONFIG_FILE_NAME, DEFAULT_MINIMUM_AGE_DAYS
                );
                DEFAULT_MINIMUM_AGE_DAYS
            }
        };

        let registry_url = parse_registry(content)
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());

        Self {
            minimum_age_days,
            registry_url,
            ..Default::default()
        }
    }
}

/// First `minimum-release-age=` line with a parseable value.
/// Lines whose value does not start with an integer are skipped.
fn parse_minimum_age(content: &str) -> Option<i64> {
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(MINIMUM_AGE_KEY))
        .find_map(|value| parse_leading_integer(value.split('=').next().unwrap_or(value)))
}

fn parse_registry(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(REGISTRY_KEY))
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .find(|url| !url.is_empty())
}
