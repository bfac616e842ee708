use thiserror::Error;

use crate::transport::StatusClass;

/// Problems with caller input. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text to translate.")]
    EmptyInput,

    #[error("Maximum length is {max} characters (got {length}).")]
    TextTooLong { length: usize, max: usize },

    #[error("File is too large ({size} bytes). Maximum size is {max} bytes.")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid language selection: {0}")]
    InvalidLanguage(String),
}

/// Failures raised by the HTTP transport.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Unreachable(String),

    #[error("HTTP error {status} ({class:?})")]
    Status { status: u16, class: StatusClass },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("request error: {0}")]
    Request(String),
}

impl TransportError {
    /// Diagnostic classification, used for logging only.
    pub fn class(&self) -> StatusClass {
        match self {
            TransportError::Status { class, .. } => *class,
            TransportError::Timeout | TransportError::Unreachable(_) => {
                StatusClass::NetworkUnreachable
            }
            TransportError::Decode(_) | TransportError::Request(_) => StatusClass::Unknown,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Unreachable(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            let status = status.as_u16();
            TransportError::Status {
                status,
                class: StatusClass::from_status(status),
            }
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Errors surfaced to callers of the client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Sign language translation failed: {0}")]
    Translation(#[source] TransportError),

    #[error("Language detection failed: {0}")]
    Detection(#[source] TransportError),

    #[error("File upload failed: {message}")]
    Upload { message: String },

    #[error("{operation} failed: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: TransportError,
    },
}

impl ClientError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}
