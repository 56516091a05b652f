//! Error types for stepwise transports.

use thiserror::Error;

/// Common errors a transport can report while executing a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The transport does not recognize the input as a valid URL.
    #[error("Invalid URL")]
    InvalidUrl,
    /// An underlying I/O error occurred, such as a refused connection.
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// The response body exceeds the maximum size limit specified in
    /// [`TransportOptions::max_response_buffer_size`](crate::TransportOptions).
    #[error("Response body size exceeds max limit")]
    ResponseTooLarge,
    /// The request did not finish within
    /// [`TransportOptions::request_timeout`](crate::TransportOptions).
    #[error("Request is not finished within timeout")]
    RequestTimeout,
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, Error>;
