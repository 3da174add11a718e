use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Missing transcript or video info, caller's responsibility.
    Validation,
    Connectivity,
    RateLimited,
    ServiceUnavailable,
    QuotaExceeded,
    Unknown,
    Cancelled,
}

/// Failed outcome of a summarize call. Every failure reaches the caller as one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SummaryError {
    pub kind: ErrorKind,
    pub message: String,
}

impl SummaryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "Request cancelled")
    }
}

pub type SummaryResult = std::result::Result<crate::types::Summary, SummaryError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx status or `success: false`; the message is what the service said.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Page is still loading. Please wait a moment and try again.")]
    Timeout,

    #[error("Error communicating with page. Please refresh and try again.")]
    Unavailable { reason: String },

    #[error("Could not get video information")]
    NoVideo,

    #[error("Page request cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid value for {env_var}: {value:?}")]
    Invalid { env_var: &'static str, value: String },
}
