use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid metadata: {0}")]
    Parse(String),
}

impl RegistryError {
    /// True when the registry answered but the body was not usable metadata
    pub fn is_parse_error(&self) -> bool {
        matches!(self, RegistryError::Parse(_))
    }
}
