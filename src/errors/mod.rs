/// Error types for the matchday data layer
///
/// `ApiError` covers everything a request can fail with. A cache miss is not an
/// error and never shows up here.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Upstream error from {endpoint} (key={key}): {message}")]
    Upstream {
        endpoint: String,
        key: String,
        message: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("Timeout: {endpoint} did not respond within {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    #[error("Transport error for {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("Failed to parse response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }

    /// Endpoint the failure is attributed to, if any
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ApiError::Upstream { endpoint, .. }
            | ApiError::Timeout { endpoint, .. }
            | ApiError::Transport { endpoint, .. }
            | ApiError::Parse { endpoint, .. } => Some(endpoint),
            ApiError::NotFound { .. } | ApiError::InvalidRequest(_) => None,
        }
    }

    /// Whether trying the same request later can succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ApiError::Upstream { .. } | ApiError::Timeout { .. } | ApiError::Transport { .. }
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
