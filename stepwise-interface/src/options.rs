//! Configuration options for transports.

use std::time::Duration;

/// Configuration options for creating a stepwise transport.
///
/// Every option is a hint; a transport applies the ones its underlying HTTP stack supports.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Optional User-Agent header value to use for all requests.
    pub user_agent: Option<String>,
    /// Whether to use the system's default proxy settings.
    pub use_default_proxy: bool,
    /// Optional maximum buffer size for response bodies.
    pub max_response_buffer_size: Option<u64>,
    /// Optional timeout duration for requests.
    pub request_timeout: Option<Duration>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            use_default_proxy: true,
            max_response_buffer_size: None,
            request_timeout: None,
        }
    }
}
