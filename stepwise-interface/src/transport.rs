//! The transport trait.
//!
//! A transport performs the actual network round-trip for the stepwise engine. It is called
//! from whichever thread executes the request: the caller's thread for blocking calls, or an
//! executor thread for callback-based calls. Implementations must therefore be thread-safe.

use std::fmt;
use std::sync::Arc;

use crate::{RawResponse, Request, Result};

/// Trait for HTTP transports.
pub trait Transport: Send + Sync + 'static {
    /// Provides a textual description of this transport.
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transport")
    }

    /// Sends the request and blocks until the complete response is available.
    fn execute(&self, request: Request) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).describe(f)
    }

    fn execute(&self, request: Request) -> Result<RawResponse> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).describe(f)
    }

    fn execute(&self, request: Request) -> Result<RawResponse> {
        (**self).execute(request)
    }
}
