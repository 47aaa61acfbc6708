//! Typed errors for the rasterization client.

/// Rasterization failures, categorized so callers can decide whether to
/// retry. None of these invalidate the command stream that was sent.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request could not be sent or the response could not be read.
    #[error("request to {url} failed")]
    Request {
        /// The endpoint that was called.
        url: String,
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("rasterization service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, usually the service's explanation.
        body: String,
    },

    /// The service answered 2xx with no image data.
    #[error("rasterization service returned an empty image")]
    EmptyImage,

    /// Every attempt failed with a retryable error.
    #[error("retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Total number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        last_error: Box<RasterError>,
    },
}

impl RasterError {
    /// Returns `true` for transient failures: timeouts, connection
    /// failures, throttling (429), and server errors (5xx).
    pub fn is_retryable(&self) -> bool {
        match self {
            RasterError::Request { source, .. } => source.is_timeout() || source.is_connect(),
            RasterError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RasterError::Status { status, .. } => Some(*status),
            RasterError::RetriesExhausted { last_error, .. } => last_error.status(),
            _ => None,
        }
    }
}
