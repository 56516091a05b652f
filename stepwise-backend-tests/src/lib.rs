#![cfg(test)]

use std::{
    collections::BTreeMap,
    convert::Infallible,
    future::Future,
    io,
    net::SocketAddr,
    num::NonZeroUsize,
    pin::Pin,
    sync::{mpsc, LazyLock, Mutex},
    time::Duration,
};

use http_body_util::{BodyExt, Full};
use hyper::{
    body::{self, Bytes},
    server::conn::http1,
    service::service_fn,
    Request, Response,
};
use hyper_util::rt::TokioIo;
use stepwise::{Client, ClientBuilder, ThreadPoolExecutor, TransportOptions};
use stepwise_backend_reqwest::ReqwestTransport;
use tokio::net::TcpListener;

mod fixtures;
mod request_ext;

pub use request_ext::{ExecutionModeHeader, RequestExt};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(10);

#[must_use]
struct HyperFixtureHandle(String);

impl Drop for HyperFixtureHandle {
    fn drop(&mut self) {
        let failed_request = {
            let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
            services
                .remove(&*self.0)
                .expect("fixture not found")
                .assertion_failed_request
        };
        if let Some(req) = failed_request {
            panic!("assertion failed for request {}: {:?}", self.0, req);
        }
    }
}

type BoxedBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

type FixtureAssertionResult = (Response<BoxedBody>, Result<(), String>);

type HyperServiceFixtureCallback = Box<
    dyn Fn(Request<body::Incoming>) -> Pin<Box<dyn Future<Output = FixtureAssertionResult> + Send>>
        + Send
        + Sync,
>;
struct HyperServiceFixture {
    svc: HyperServiceFixtureCallback,
    assertion_failed_request: Option<String>,
}

static HYPER_SERVICE_FIXTURES: Mutex<BTreeMap<String, HyperServiceFixture>> =
    Mutex::new(BTreeMap::new());

/// Serves `path` with `svc_fn` until the handle is dropped. An `Err` returned by `svc_fn`
/// describes a failed assertion and fails the test when the handle drops.
fn add_hyper_fixture<Fut>(
    path: impl Into<String>,
    svc_fn: impl Fn(Request<body::Incoming>) -> Fut + Send + Sync + 'static,
) -> HyperFixtureHandle
where
    Fut: Future<Output = (Response<Full<Bytes>>, Result<(), String>)> + Send + 'static,
{
    let mut path: String = path.into();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    let svc = Box::new(move |req| {
        let fut = svc_fn(req);
        Box::pin(async move {
            let (resp, result) = fut.await;
            let resp = resp.map(|body| {
                body.map_err(|never| -> hyper::Error { match never {} })
                    .boxed()
            });
            (resp, result)
        }) as _
    });
    let fixture = HyperServiceFixture {
        svc,
        assertion_failed_request: None,
    };
    HYPER_SERVICE_FIXTURES
        .lock()
        .unwrap()
        .insert(path.clone(), fixture);
    HyperFixtureHandle(path)
}

async fn handle_service(req: Request<body::Incoming>) -> Result<Response<BoxedBody>, Infallible> {
    let path = req.uri().path().to_owned();
    let fut = {
        let services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        let fixture = services.get(&*path).unwrap();
        (fixture.svc)(req)
    };
    let (response, result) = fut.await;

    if let Err(failure) = result {
        let mut services = HYPER_SERVICE_FIXTURES.lock().unwrap();
        if let Some(fixture) = services.get_mut(&*path) {
            fixture.assertion_failed_request = Some(failure);
        }
    }

    Ok(response)
}

async fn setup_hyper_impl() -> Result<String, io::Error> {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));

    let listener = TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.expect("accept failed");
            let io = TokioIo::new(stream);

            tokio::task::spawn(async move {
                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service_fn(handle_service))
                    .await
                {
                    eprintln!("Error serving connection: {err:?}");
                }
            });
        }
    });

    Ok(format!("http://127.0.0.1:{port}"))
}

static TOKIO_RT: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
});

static BASE_URL: LazyLock<io::Result<String>> =
    LazyLock::new(|| TOKIO_RT.block_on(setup_hyper_impl()));

/// Absolute URL of `path` on the fixture server.
fn fixture_url(path: &str) -> String {
    let base = BASE_URL.as_ref().expect("fixture server failed to start");
    format!("{base}/{}", path.trim_start_matches('/'))
}

/// A builder with the reqwest transport and a two-thread pool, tagging each request with the
/// mode it is expected to run in.
fn init_builder(mode: ExecutionModeHeader) -> ClientBuilder {
    let transport = ReqwestTransport::new(TransportOptions::default()).unwrap();
    let executor = ThreadPoolExecutor::with_threads(NonZeroUsize::new(2).unwrap()).unwrap();
    Client::builder()
        .transport(transport)
        .executor(executor)
        .with_default_header(request_ext::MODE_HEADER, mode.as_str())
}

fn init_client(mode: ExecutionModeHeader) -> Client {
    init_builder(mode).build().unwrap()
}

/// Waits for the single callback result sent through `rx`.
fn recv_callback<T>(rx: &mpsc::Receiver<T>) -> T {
    rx.recv_timeout(CALLBACK_TIMEOUT)
        .expect("no callback within timeout")
}
