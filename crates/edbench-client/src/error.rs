//! Error types for the evaluation client.

use reqwest::StatusCode;

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Evaluation attempted without an API key. Raised locally, before any
    /// network call.
    #[error("api key required for evaluation")]
    MissingApiKey,

    /// Non-success HTTP status from the evaluation service. Surfaced
    /// uniformly; the client does not branch on which status it was.
    #[error("HTTP {status} from {url}: {body}")]
    Http {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// Network-level failure from the transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not decode into the expected shape.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Client construction failed.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The caller-supplied system failed while producing a response.
    #[error("system error: {0}")]
    System(#[from] anyhow::Error),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
