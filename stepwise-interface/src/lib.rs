//! Interface definitions for stepwise HTTP transports.
//!
//! This crate provides the interface that transports must implement to be usable by the
//! `stepwise` request engine. It defines the plain-data request and response types that cross
//! the boundary, the [`Transport`] trait itself, and the common error type transports report.
//!
//! ## Implementing a transport
//!
//! A transport receives a fully resolved [`Request`] (absolute URL, merged headers, query
//! parameters and an already-encoded body) and returns a [`RawResponse`] holding the status
//! code, response headers and the complete body. The engine never inspects sockets,
//! connection pools, redirects or TLS; all of that belongs to the transport.
//!
//! Whether a non-2xx status is a failure is up to the transport. The transports shipped with
//! stepwise report every status as a normal response and leave the decision to the caller.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

mod error;
mod options;
mod request;
mod response;
mod transport;

pub use error::{Error, Result};
pub use options::TransportOptions;
pub use request::{Body, Method, Request};
pub use response::RawResponse;
pub use transport::Transport;
