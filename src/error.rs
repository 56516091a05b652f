use thiserror::Error;

use stepwise_interface::Error as TransportError;

use crate::codec::CodecError;
use crate::executor::RejectReason;
use crate::StatusCode;

/// The errors produced while configuring or executing a request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A configuration call broke the request contract. Always reported at the call site,
    /// never through a failure callback.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
    /// The transport failed to complete the round-trip.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// The server answered with a status the caller asked to treat as failure.
    ///
    /// See [`crate::Response::with_successful_status`].
    #[error("Server responded with unsuccessful status code {0}")]
    NonSuccessfulStatusCode(StatusCode),
    /// The response body could not be converted into the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),
    /// The codec could not encode the request body.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] CodecError),
    /// The executor refused to run the request.
    #[error("Request was not accepted for dispatch: {0}")]
    DispatchRejected(#[source] RejectReason),
    /// Executing a dispatched request panicked before producing a result.
    #[error("Request execution panicked: {0}")]
    ExecutionPanicked(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Validation`].
    Validation,
    /// See [`Error::Transport`], [`Error::NonSuccessfulStatusCode`] and
    /// [`Error::ExecutionPanicked`].
    Transport,
    /// See [`Error::Decode`].
    Decode,
    /// See [`Error::Encode`].
    Encode,
    /// See [`Error::DispatchRejected`].
    DispatchRejected,
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Transport(_)
            | Error::NonSuccessfulStatusCode(_)
            | Error::ExecutionPanicked(_) => ErrorKind::Transport,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Encode(_) => ErrorKind::Encode,
            Error::DispatchRejected(_) => ErrorKind::DispatchRejected,
        }
    }
}

/// A `Result` alias where the `Err` case is [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations detected while building or dispatching a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The request has no HTTP verb.
    #[error("missing HTTP verb")]
    MissingVerb,
    /// The request has no URL.
    #[error("missing URL")]
    MissingUrl,
    /// An empty string was given where a URL was expected.
    #[error("URL is empty")]
    EmptyUrl,
    /// The URL could not be parsed as an absolute URL.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        #[source]
        source: url::ParseError,
    },
    /// A custom verb name was empty.
    #[error("custom verb is empty")]
    EmptyVerb,
    /// A header key was empty.
    #[error("header key is empty")]
    EmptyHeaderKey,
    /// A query parameter key was empty.
    #[error("query parameter key is empty")]
    EmptyQueryKey,
    /// The redirect limit was below 1.
    #[error("redirect limit must be at least 1, got {0}")]
    InvalidRedirectLimit(u32),
    /// `()` carries no information and cannot be the expected response type.
    #[error("cannot expect the unit type as a response")]
    UnitResponseType,
    /// The request body was empty or null.
    #[error("request body is empty")]
    EmptyBody,
    /// The request body could not be represented as JSON.
    #[error("request body is not valid JSON: {0}")]
    InvalidBody(String),
    /// A JSON object key for the request body was empty.
    #[error("body key is empty")]
    EmptyBodyKey,
}

/// The response body could not be converted into the expected type.
///
/// Both variants keep the raw body so it can be inspected when debugging.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The codec could not parse the body at all.
    #[error("response body is not a valid document: {source}")]
    Malformed {
        /// The codec's parse error.
        #[source]
        source: CodecError,
        /// The raw response body.
        body: Vec<u8>,
    },
    /// The body parsed, but its shape does not match the expected type.
    #[error("response body does not match `{target}`: {source}")]
    Mismatch {
        /// Name of the expected type.
        target: &'static str,
        /// The conversion error.
        #[source]
        source: serde_json::Error,
        /// The raw response body.
        body: Vec<u8>,
    },
}

impl DecodeError {
    /// The raw response body that failed to decode.
    pub fn body(&self) -> &[u8] {
        match self {
            DecodeError::Malformed { body, .. } | DecodeError::Mismatch { body, .. } => body,
        }
    }
}
