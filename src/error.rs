use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoroError {
    /// Message reported by the endpoint in an `{"error": ...}` body.
    #[error("{0}")]
    Endpoint(String),

    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Lookup actor error: {0}")]
    Actor(String),
}

pub type Result<T> = std::result::Result<T, LoroError>;
