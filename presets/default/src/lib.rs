//! Ready-to-use [`stepwise`] clients.
//!
//! [`client`] builds a [`Client`] that sends requests through
//! [`stepwise_backend_reqwest::ReqwestTransport`] and runs callbacks on a
//! [`ThreadPoolExecutor`] sized to the machine. Each call builds a new client with its own
//! thread pool, so create one at startup and share it.
//!
//! ```no_run
//! let client = stepwise_preset::client()?;
//! let ip = client
//!     .begin()
//!     .get()
//!     .expecting::<String>()?
//!     .at("https://api.ipify.org")?;
//! println!("{ip}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use log::debug;
use stepwise::{BuildClientError, BuildClientResult, Client, ThreadPoolExecutor, TransportOptions};
use stepwise_backend_reqwest::ReqwestTransport;

/// Request timeout applied by [`client`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default transport options used by [`client`].
pub fn default_options() -> TransportOptions {
    TransportOptions {
        user_agent: Some(concat!("stepwise/", env!("CARGO_PKG_VERSION")).to_owned()),
        request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        ..Default::default()
    }
}

/// Build a client with [`default_options`].
pub fn client() -> BuildClientResult<Client> {
    client_with(default_options())
}

/// Build a client whose transport uses `options`.
pub fn client_with(options: TransportOptions) -> BuildClientResult<Client> {
    let threads = thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
    debug!("Building preset client with {threads} worker threads");
    let executor = ThreadPoolExecutor::with_threads(threads).map_err(BuildClientError::Executor)?;
    Client::builder()
        .transport(ReqwestTransport::new(options)?)
        .executor(executor)
        .build()
}
