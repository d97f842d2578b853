use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiTestError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Non-JSON body, usually an nginx error page while pmm-managed is down.
    #[error("response from nginx: {0}")]
    FromNginx(String),

    /// JSON error response from the API.
    #[error("[{code}] {operation}: {payload}")]
    ApiError {
        operation: String,
        code: u16,
        payload: serde_json::Value,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid ENV variable {name}: {value}")]
    InvalidEnvError { name: String, value: String },

    #[error("Server is not ready: {0}")]
    NotReady(Box<ApiTestError>),

    #[error("Operation cancelled by shutdown signal")]
    Cancelled,
}

impl ApiTestError {
    /// HTTP status code for API errors.
    pub fn code(&self) -> Option<u16> {
        match self {
            ApiTestError::ApiError { code, .. } => Some(*code),
            ApiTestError::NotReady(inner) => inner.code(),
            _ => None,
        }
    }

    /// The `message` field of a JSON error payload, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiTestError::ApiError { payload, .. } => {
                payload.get("message").and_then(|m| m.as_str())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiTestError>;
