use std::io;

use stepwise_interface::Error as TransportError;
use thiserror::Error;

/// Errors raised inside the reqwest transport before they are mapped to
/// [`stepwise_interface::Error`].
#[derive(Error, Debug)]
pub enum ReqwestBackendError {
    /// reqwest reported an error.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The response body exceeded the configured limit.
    #[error("response too large")]
    ResponseTooLarge,
    /// A request header name is not valid HTTP.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),
    /// A request header value is not valid HTTP.
    #[error("invalid header value for {0}")]
    InvalidHeaderValue(String),
    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// A custom verb is not a valid HTTP method token.
    #[error("invalid HTTP method: {0}")]
    InvalidMethod(String),
    /// An I/O error, such as failing to start the runtime.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<ReqwestBackendError> for TransportError {
    fn from(err: ReqwestBackendError) -> Self {
        match err {
            ReqwestBackendError::Reqwest(e) => {
                if e.is_timeout() {
                    TransportError::RequestTimeout
                } else {
                    TransportError::Io(io::Error::other(e))
                }
            }
            ReqwestBackendError::ResponseTooLarge => TransportError::ResponseTooLarge,
            ReqwestBackendError::InvalidUrl(_) => TransportError::InvalidUrl,
            ReqwestBackendError::Io(e) => TransportError::Io(e),
            other => TransportError::Io(io::Error::new(io::ErrorKind::InvalidInput, other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReqwestBackendError>;
