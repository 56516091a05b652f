use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

mod builder;
mod error;

pub use builder::ClientBuilder;
pub use error::{BuildClientError, BuildClientResult};

use crate::engine::Engine;
use crate::error::ValidationError;
use crate::steps::Initial;
use crate::{RequestDescriptor, Result};

/// Entry point for building requests.
///
/// A client holds the transport, executor and codec shared by every chain it starts, plus the
/// default headers each chain is seeded with. It is cheap to clone; clones share the same
/// transport and executor.
///
/// ```
/// # fn f(client: stepwise::Client) -> stepwise::Result<()> {
/// #[derive(serde::Deserialize)]
/// struct User {
///     name: String,
/// }
///
/// let user: User = client
///     .begin()
///     .get()
///     .using_header("Authorization", "Bearer token")?
///     .expecting::<User>()?
///     .at("https://example.com/users/1")?;
/// println!("{}", user.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    engine: Arc<Engine>,
    default_headers: Arc<BTreeMap<String, String>>,
}

impl Client {
    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Start a new request chain seeded with this client's default headers.
    pub fn begin(&self) -> Initial {
        Initial::new(
            Arc::clone(&self.engine),
            RequestDescriptor::with_default_headers(&self.default_headers),
        )
    }

    /// Return a new client that also sends `key: value` by default. This client is unchanged.
    pub fn using_default_header(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::EmptyHeaderKey.into());
        }
        let mut default_headers = (*self.default_headers).clone();
        debug!("Deriving client with default header {key:?}");
        default_headers.insert(key, value.into());
        Ok(Self {
            engine: Arc::clone(&self.engine),
            default_headers: Arc::new(default_headers),
        })
    }

    /// Headers every new chain starts with.
    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    /// Whether callback-based requests run on the executor.
    pub fn is_async_enabled(&self) -> bool {
        self.engine.is_async_enabled()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("engine", &self.engine)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}
