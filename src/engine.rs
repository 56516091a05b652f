//! Execution of completed request descriptors.
//!
//! Blocking and callback-based calls share one routine, [`Engine::execute`]. The
//! [`ExecutionMode`] only decides how the outcome reaches the caller: returned directly, or
//! handed to exactly one callback from an executor thread.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, error, trace, warn};
use stepwise_interface::{Body, Method as MethodImpl, Request, Transport};
use url::Url;

use crate::callback::Callbacks;
use crate::codec::Codec;
use crate::decode::FromResponse;
use crate::executor::{Executor, Task};
use crate::{Error, RequestDescriptor, Response, Result};

/// How the outcome of a request is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// The calling thread blocks and receives the result.
    Sync,
    /// The result is delivered to a callback.
    Async,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExecutionMode::Sync => "sync",
            ExecutionMode::Async => "async",
        })
    }
}

pub(crate) struct Engine {
    transport: Box<dyn Transport>,
    codec: Box<dyn Codec>,
    executor: Box<dyn Executor>,
    async_enabled: bool,
}

impl Engine {
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        codec: Box<dyn Codec>,
        executor: Box<dyn Executor>,
        async_enabled: bool,
    ) -> Self {
        Self {
            transport,
            codec,
            executor,
            async_enabled,
        }
    }

    pub(crate) fn is_async_enabled(&self) -> bool {
        self.async_enabled
    }

    pub(crate) fn execute<T: FromResponse>(
        &self,
        descriptor: &RequestDescriptor,
        mode: ExecutionMode,
    ) -> Result<T> {
        let request = self.prepare(descriptor)?;
        debug!("Executing {} {} ({mode})", request.method, request.url);
        trace!(
            "Request headers: {:?}, query: {:?}, body: {} bytes",
            request.headers,
            request.query_params,
            request.body.as_ref().map_or(0, |b| b.content.len())
        );

        let raw = self.transport.execute(request)?;
        trace!(
            "Received status {} with {} body bytes",
            raw.status,
            raw.body.len()
        );
        Ok(T::from_response(Response::from(raw), &*self.codec)?)
    }

    pub(crate) fn dispatch<T: FromResponse>(
        self: &Arc<Self>,
        descriptor: RequestDescriptor,
        callbacks: Callbacks<T>,
    ) -> Result<()> {
        descriptor.check_valid()?;

        let engine = Arc::clone(self);
        let task = Task::new(move |outcome| match outcome {
            Ok(()) => {
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    engine.execute(&descriptor, ExecutionMode::Async)
                }))
                .unwrap_or_else(|payload| {
                    let message = panic_message(&*payload);
                    error!("Request execution panicked: {message}");
                    Err(Error::ExecutionPanicked(message))
                });
                // Outside the unwind guard so callback panics still propagate.
                callbacks.deliver(result)
            }
            Err(reason) => callbacks.deliver(Err(Error::DispatchRejected(reason))),
        });

        if !self.async_enabled {
            debug!("Async callbacks disabled, running request on the calling thread");
            task.run();
            return Ok(());
        }
        if let Err(rejected) = self.executor.submit(task) {
            warn!("Executor rejected request: {}", rejected.reason());
            rejected.reject();
        }
        Ok(())
    }

    pub(crate) fn download(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("Downloading {url}");
        let raw = self
            .transport
            .execute(Request::new(MethodImpl::Get, url.as_str()))?;
        let response = Response::from(raw).with_successful_status()?;
        Ok(response.into_bytes())
    }

    fn prepare(&self, descriptor: &RequestDescriptor) -> Result<Request> {
        let (verb, url) = descriptor.check_valid()?;
        let mut request = Request::new(verb.to_impl(), url.as_str());
        request.headers = descriptor
            .headers()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        request.query_params = descriptor
            .query_params()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(body) = descriptor.body() {
            let content = self.codec.encode(body).map_err(Error::Encode)?;
            request.body = Some(Body {
                content,
                content_type: self.codec.content_type().into(),
            });
        }
        Ok(request)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

struct TransportDebug<'a> {
    inner: &'a dyn Transport,
}
impl fmt::Debug for TransportDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.describe(f)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field(
                "transport",
                &TransportDebug {
                    inner: &*self.transport,
                },
            )
            .field("async_enabled", &self.async_enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use serde_json::json;

    use super::*;
    use crate::callback::Callbacks;
    use crate::codec::JsonCodec;
    use crate::executor::{InlineExecutor, RejectReason};
    use crate::test_util::{MockTransport, PanickingTransport, RejectingExecutor};
    use crate::{ErrorKind, Method, ValidationError};

    fn engine(
        transport: impl Transport,
        executor: impl Executor,
        async_enabled: bool,
    ) -> Arc<Engine> {
        Arc::new(Engine::new(
            Box::new(transport),
            Box::new(JsonCodec),
            Box::new(executor),
            async_enabled,
        ))
    }

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::default()
            .with_verb(Method::post())
            .with_url(Url::parse("https://example.com/items").unwrap())
            .with_header("X-Trace", "abc")
            .with_query_param("dry_run", "true")
            .with_body(json!({"name": "widget"}))
    }

    fn channel_callbacks<T: Send + 'static>(
    ) -> (Callbacks<T>, mpsc::Receiver<std::result::Result<T, Error>>) {
        let (tx, rx) = mpsc::channel();
        let failure_tx = tx.clone();
        let callbacks = Callbacks::new(
            Box::new(move |v: T| tx.send(Ok(v)).unwrap()),
            Box::new(move |e: Error| failure_tx.send(Err(e)).unwrap()),
        );
        (callbacks, rx)
    }

    #[test]
    fn test_execute_builds_transport_request() {
        let transport = MockTransport::replying(201, r#"{"id":9}"#);
        let engine = engine(transport.clone(), InlineExecutor, true);

        let value: serde_json::Value = engine
            .execute(&descriptor(), ExecutionMode::Sync)
            .unwrap();
        assert_eq!(value, json!({"id": 9}));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, MethodImpl::Post);
        assert_eq!(request.url, "https://example.com/items");
        assert_eq!(request.header("x-trace"), Some("abc"));
        assert_eq!(
            request.query_params,
            [("dry_run".to_string(), "true".to_string())]
        );
        let body = request.body.as_ref().unwrap();
        assert_eq!(body.content, br#"{"name":"widget"}"#);
        assert_eq!(body.content_type, "application/json");
    }

    #[test]
    fn test_incomplete_descriptor_never_reaches_transport() {
        let transport = MockTransport::replying(200, "{}");
        let engine = engine(transport.clone(), InlineExecutor, true);

        let err = engine
            .execute::<Response>(&RequestDescriptor::default(), ExecutionMode::Sync)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingVerb)
        ));

        let (callbacks, rx) = channel_callbacks::<Response>();
        let no_url = RequestDescriptor::default().with_verb(Method::get());
        let err = engine.dispatch(no_url, callbacks).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingUrl)));
        assert!(rx.try_recv().is_err());

        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_transport_failure_is_classified() {
        let engine = engine(MockTransport::failing(), InlineExecutor, true);
        let err = engine
            .execute::<Response>(&descriptor(), ExecutionMode::Sync)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_dispatch_disabled_runs_on_caller() {
        let transport = MockTransport::replying(200, "42");
        let engine = engine(transport, RejectingExecutor(RejectReason::ShutDown), false);

        let caller = thread::current().id();
        let (tx, rx) = mpsc::channel();
        let callbacks = Callbacks::new(
            Box::new(move |v: i32| tx.send((v, thread::current().id())).unwrap()),
            Box::new(|e: Error| panic!("unexpected failure: {e}")),
        );
        engine.dispatch(descriptor(), callbacks).unwrap();
        assert_eq!(rx.try_recv().unwrap(), (42, caller));
    }

    #[test]
    fn test_dispatch_rejection_reaches_failure_callback() {
        let transport = MockTransport::replying(200, "42");
        let engine = engine(
            transport.clone(),
            RejectingExecutor(RejectReason::Saturated),
            true,
        );

        let (callbacks, rx) = channel_callbacks::<i32>();
        engine.dispatch(descriptor(), callbacks).unwrap();
        let err = rx.try_recv().unwrap().unwrap_err();
        assert!(matches!(
            err,
            Error::DispatchRejected(RejectReason::Saturated)
        ));
        assert!(rx.try_recv().is_err());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_dispatch_delivers_transport_panic_as_failure() {
        let engine = engine(PanickingTransport, InlineExecutor, false);

        let (callbacks, rx) = channel_callbacks::<i32>();
        engine.dispatch(descriptor(), callbacks).unwrap();
        let err = rx.try_recv().unwrap().unwrap_err();
        assert!(matches!(&err, Error::ExecutionPanicked(m) if m.contains("connection reset")));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(rx.try_recv().is_err());
    }

    #[cfg(feature = "thread-pool")]
    #[test]
    fn test_pooled_dispatch_delivers_transport_panic_as_failure() {
        use std::num::NonZeroUsize;
        use std::time::Duration;

        use crate::executor::ThreadPoolExecutor;

        let pool = ThreadPoolExecutor::with_threads(NonZeroUsize::new(1).unwrap()).unwrap();
        let engine = engine(PanickingTransport, pool, true);

        let (callbacks, rx) = channel_callbacks::<i32>();
        engine.dispatch(descriptor(), callbacks).unwrap();
        let err = rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_download_requires_success() {
        let transport = MockTransport::replying(200, "payload");
        let engine = engine(transport.clone(), InlineExecutor, true);
        let url = Url::parse("https://example.com/file").unwrap();
        assert_eq!(engine.download(&url).unwrap(), b"payload");
        assert!(transport.requests()[0].headers.is_empty());

        let engine = self::engine(MockTransport::replying(404, ""), InlineExecutor, true);
        assert!(matches!(
            engine.download(&url),
            Err(Error::NonSuccessfulStatusCode(s)) if s == 404
        ));
    }
}
