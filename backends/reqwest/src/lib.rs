//! [`reqwest`] transport for stepwise.
//!
//! [`ReqwestTransport`] implements [`stepwise_interface::Transport`] on top of an async reqwest
//! client. Requests are driven on a small tokio runtime owned by the transport. When a request
//! is issued from inside a multi-threaded tokio runtime, that runtime is used instead through
//! [`tokio::task::block_in_place`].
//!
//! Redirects follow reqwest's default policy. Every status code is returned as a normal
//! response.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod client;
mod error;
mod request;
mod response;

pub use client::ReqwestTransport;
pub use error::ReqwestBackendError;
