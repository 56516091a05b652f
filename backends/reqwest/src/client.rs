use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use log::trace;
use stepwise_interface::{RawResponse, Request, Transport, TransportOptions};
use tokio::runtime::{Handle, Runtime};

use crate::error::{ReqwestBackendError, Result};
use crate::request::build_request;
use crate::response::collect_response;

/// A [`Transport`] backed by [`reqwest`].
///
/// Cloning is cheap; clones share the connection pool and the runtime. The runtime is only
/// built the first time a request runs outside of a tokio context.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    max_response_buffer_size: Option<u64>,
    managed_runtime: Arc<OnceLock<Runtime>>,
}

impl ReqwestTransport {
    /// Create a transport from `options`.
    pub fn new(options: TransportOptions) -> stepwise_interface::Result<Self> {
        let client = build_reqwest_client(&options)?;
        Ok(Self {
            client,
            max_response_buffer_size: options.max_response_buffer_size,
            managed_runtime: Arc::new(OnceLock::new()),
        })
    }

    async fn send(&self, request: Request) -> Result<RawResponse> {
        let response = build_request(&self.client, request)?.send().await?;
        collect_response(response, self.max_response_buffer_size).await
    }

    /// Run `task` to completion, reusing the caller's tokio runtime when there is one.
    fn execute_with_runtime<Fut, T>(&self, task: impl FnOnce() -> Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        if Handle::try_current().is_ok() {
            return tokio::task::block_in_place(|| Handle::current().block_on(task()));
        }
        let runtime = match self.managed_runtime.get() {
            Some(runtime) => runtime,
            None => {
                let runtime = create_managed_runtime()?;
                self.managed_runtime.get_or_init(|| runtime)
            }
        };
        runtime.block_on(task())
    }
}

fn build_reqwest_client(options: &TransportOptions) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if !options.use_default_proxy {
        builder = builder.no_proxy();
    }
    if let Some(timeout) = options.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ReqwestBackendError::Reqwest)
}

fn create_managed_runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("stepwise-reqwest")
        .enable_all()
        .build()?)
}

impl Transport for ReqwestTransport {
    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReqwestTransport")
    }

    fn execute(&self, request: Request) -> stepwise_interface::Result<RawResponse> {
        trace!("reqwest: {} {}", request.method, request.url);
        Ok(self.execute_with_runtime(|| self.send(request))?)
    }
}
