use thiserror::Error;

/// Failure of a single HTTP call. The variants only record the cause for the
/// diagnostic log; every caller handles them the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (connection refused, CORS, timeout).
    #[error("Request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    /// The server answered with a non-success status.
    #[error("HTTP error {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("Failed to parse response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl FetchError {
    pub fn request(endpoint: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            message: err.to_string(),
        }
    }

    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
        }
    }

    pub fn decode(endpoint: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: err.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Request { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }
}

/// Error types for building export documents
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV buffer error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Every exported record must serialize to a JSON object.
    #[error("Row {row} of section '{section}' is not an object")]
    Row { section: String, row: usize },
}

/// Raw filter input that cannot be turned into a filter value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterParseError {
    #[error(transparent)]
    Enum(#[from] common::ParseEnumError),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),
}
