use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use stepwise_interface::Transport;

use super::{BuildClientError, BuildClientResult, Client};
use crate::codec::{Codec, JsonCodec};
use crate::engine::Engine;
use crate::executor::{Executor, InlineExecutor};
use crate::header;

/// Configures and creates a [`Client`].
///
/// A transport is required. Everything else has a default: the [`InlineExecutor`], the
/// [`JsonCodec`], async callbacks enabled, and the default headers
/// `Accept: application/json, text/plain` and `Content-Type: application/json`.
pub struct ClientBuilder {
    transport: Option<Box<dyn Transport>>,
    executor: Option<Box<dyn Executor>>,
    codec: Option<Box<dyn Codec>>,
    default_headers: BTreeMap<String, String>,
    async_enabled: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            transport: None,
            executor: None,
            codec: None,
            default_headers: BTreeMap::from([
                (header::ACCEPT.to_owned(), header::DEFAULT_ACCEPT.to_owned()),
                (
                    header::CONTENT_TYPE.to_owned(),
                    header::DEFAULT_CONTENT_TYPE.to_owned(),
                ),
            ]),
            async_enabled: true,
        }
    }
}

impl ClientBuilder {
    /// Performs the network round-trips.
    pub fn transport(mut self, transport: impl Transport) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Runs requests dispatched with callbacks.
    pub fn executor(mut self, executor: impl Executor) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    /// Encodes request bodies and parses response bodies.
    pub fn codec(mut self, codec: impl Codec) -> Self {
        self.codec = Some(Box::new(codec));
        self
    }

    /// Replace all default headers, including the built-in ones.
    pub fn default_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.default_headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Add or replace one default header.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Run callback-based requests on the executor. This is the default.
    pub fn enable_async_callbacks(mut self) -> Self {
        self.async_enabled = true;
        self
    }

    /// Run callback-based requests on the calling thread, bypassing the executor.
    pub fn disable_async_callbacks(mut self) -> Self {
        self.async_enabled = false;
        self
    }

    /// Build the client.
    pub fn build(self) -> BuildClientResult<Client> {
        let transport = self.transport.ok_or(BuildClientError::NoTransport)?;
        if self.default_headers.keys().any(String::is_empty) {
            return Err(BuildClientError::EmptyHeaderKey);
        }
        let engine = Engine::new(
            transport,
            self.codec.unwrap_or_else(|| Box::new(JsonCodec)),
            self.executor.unwrap_or_else(|| Box::new(InlineExecutor)),
            self.async_enabled,
        );
        debug!("Built client with {engine:?}");
        Ok(Client {
            engine: Arc::new(engine),
            default_headers: Arc::new(self.default_headers),
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("has_transport", &self.transport.is_some())
            .field("has_executor", &self.executor.is_some())
            .field("has_codec", &self.codec.is_some())
            .field("default_headers", &self.default_headers)
            .field("async_enabled", &self.async_enabled)
            .finish()
    }
}
