//! Fluent, typestate-checked HTTP requests with blocking or callback delivery.
//!
//! ## Overview
//!
//! A request is built through a chain of calls, each returning a different step type. The step
//! types only expose the calls that are legal at that point, so a request without a verb, or
//! with a success callback but no failure callback, cannot be written down at all. The chain
//! ends in one of two ways:
//!
//! - `at(url)` on a configuring step blocks and returns the result.
//! - `on_success(..).on_failure(..).at(url)` returns immediately and later invokes exactly one of
//!   the two callbacks from the client's [`Executor`].
//!
//! Both paths run the same execution routine, so headers, encoding, decoding and error
//! classification behave identically.
//!
//! ## The `stepwise` crate
//!
//! The `stepwise` crate owns the request chain, the execution engine and response decoding. It
//! does no networking itself; a [`Transport`] from [`stepwise-interface`] performs the actual
//! round-trip. `stepwise-backend-reqwest` provides one, and `stepwise-preset` wires it up with a
//! thread pool and sensible defaults.
//!
//! There is no process-wide client. Build one with [`Client::builder`] (or a preset factory) and
//! share it; clones are cheap and share their transport and executor.
//!
//! ## Usage
//!
//! ```no_run
//! # fn run(client: stepwise::Client) -> stepwise::Result<()> {
//! #[derive(serde::Deserialize)]
//! struct Repo {
//!     stargazers_count: u64,
//! }
//!
//! // Blocking
//! let repo = client
//!     .begin()
//!     .get()
//!     .using_header("User-Agent", "stepwise")?
//!     .expecting::<Repo>()?
//!     .at("https://api.github.com/repos/rust-lang/rust")?;
//! println!("{} stars", repo.stargazers_count);
//!
//! // Callbacks
//! client
//!     .begin()
//!     .body_with_key_value("name", "widget")?
//!     .post()
//!     .on_success(|response| println!("created: {}", response.status()))
//!     .on_failure(|err| eprintln!("failed: {err}"))
//!     .at("https://example.com/items")?;
//! # Ok(())
//! # }
//! ```
//!
//! Every status code the transport reports, 4xx and 5xx included, is decoded like any other
//! response. Expect a [`Response`] and call [`Response::with_successful_status`] to treat
//! non-2xx answers as errors.
//!
//! ## Features
//!
//! - `thread-pool` (default): Enable [`ThreadPoolExecutor`].
//!
//! [`stepwise-interface`]: stepwise_interface

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(missing_docs)]

mod client;
mod descriptor;
mod error;
mod request;
mod response;
mod status;

pub mod callback;
pub mod codec;
pub mod decode;
pub mod engine;
pub mod executor;
pub mod header;
pub mod steps;

#[cfg(test)]
mod test_util;

pub use client::{BuildClientError, BuildClientResult, Client, ClientBuilder};
pub use codec::{Codec, JsonCodec};
pub use decode::FromResponse;
pub use descriptor::RequestDescriptor;
pub use engine::ExecutionMode;
pub use error::{DecodeError, Error, ErrorKind, Result, ValidationError};
#[cfg(feature = "thread-pool")]
#[cfg_attr(docsrs, doc(cfg(feature = "thread-pool")))]
pub use executor::ThreadPoolExecutor;
pub use executor::{Executor, InlineExecutor, RejectReason, Rejected, Task};
pub use request::{IntoUrl, Method};
pub use response::Response;
pub use status::{StatusClass, StatusCode};
pub use stepwise_interface::{RawResponse, Transport, TransportOptions};
pub use url::Url;
