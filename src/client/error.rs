use std::io;

use thiserror::Error;

use stepwise_interface::Error as TransportError;

/// The errors produced when building a [`crate::Client`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildClientError {
    /// No transport was configured. Pass one to [`crate::ClientBuilder::transport`], or use a
    /// preset crate such as `stepwise-preset`.
    #[error("No transport configured. Call `ClientBuilder::transport` or use a preset crate such as stepwise-preset.")]
    NoTransport,
    /// A default header was given an empty key.
    #[error("Default header key is empty")]
    EmptyHeaderKey,
    /// The transport returned an error while being created.
    #[error("Error creating transport: {0}")]
    BackendError(#[from] TransportError),
    /// The executor could not be started.
    #[error("Error starting executor: {0}")]
    Executor(#[source] io::Error),
}

/// A `Result` alias where the `Err` case is [`BuildClientError`].
pub type BuildClientResult<T> = Result<T, BuildClientError>;
