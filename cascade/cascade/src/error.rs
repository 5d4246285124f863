use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopulateError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid endpoint url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode options from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("select control '#{0}' not found")]
    ControlNotFound(String),
}

impl PopulateError {
    /// True when the failure happened before any response body was seen.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Client(_))
    }
}
