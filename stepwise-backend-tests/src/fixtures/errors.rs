#[cfg(test)]
mod tests {
    use std::net::TcpListener as StdTcpListener;
    use std::sync::{mpsc, Arc};
    use std::time::Duration;

    use stepwise::{DecodeError, Error, ErrorKind, RejectReason};
    use stepwise_interface::Error as TransportError;

    use crate::*;

    fn closed_port_url() -> String {
        let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/closed")
    }

    fn dispatch_i32(client: &Client, url: String) -> Result<i32, Error> {
        let (tx, rx) = mpsc::channel();
        let failure_tx = tx.clone();
        client
            .begin()
            .get()
            .expecting::<i32>()
            .unwrap()
            .on_success(move |v| tx.send(Ok(v)).unwrap())
            .on_failure(move |e| failure_tx.send(Err(e)).unwrap())
            .at(url)
            .unwrap();
        let result = crate::recv_callback(&rx);
        assert!(
            rx.recv_timeout(Duration::from_millis(100)).is_err(),
            "callback fired twice"
        );
        result
    }

    #[test]
    fn test_invalid_json() {
        const PATH: &str = "errors/invalid_json";
        let _handle = crate::add_hyper_fixture(PATH, |_req| async move {
            (Response::new(Full::new(Bytes::from("{not json"))), Ok(()))
        });

        let client = crate::init_client(ExecutionModeHeader::Blocking);
        let err = client
            .begin()
            .get()
            .expecting::<i32>()
            .unwrap()
            .at(crate::fixture_url(PATH))
            .unwrap_err();
        match err {
            Error::Decode(e @ DecodeError::Malformed { .. }) => assert_eq!(e.body(), b"{not json"),
            other => panic!("expected malformed body, got {other:?}"),
        }

        let client = crate::init_client(ExecutionModeHeader::Callback);
        let err = dispatch_i32(&client, crate::fixture_url(PATH)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_connection_refused() {
        let client = crate::init_client(ExecutionModeHeader::Blocking);
        let err = client.begin().get().at(closed_port_url()).unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Io(_))));

        let client = crate::init_client(ExecutionModeHeader::Callback);
        let err = dispatch_i32(&client, closed_port_url()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_response_too_large() {
        const PATH: &str = "errors/too_large";
        let _handle = crate::add_hyper_fixture(PATH, |_req| async move {
            (Response::new(Full::new(Bytes::from(vec![b'a'; 4096]))), Ok(()))
        });

        let transport = ReqwestTransport::new(TransportOptions {
            max_response_buffer_size: Some(1024),
            ..Default::default()
        })
        .unwrap();
        let client = Client::builder().transport(transport).build().unwrap();
        let err = client.begin().get().at(crate::fixture_url(PATH)).unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::ResponseTooLarge)
        ));
    }

    #[test]
    fn test_request_timeout() {
        const PATH: &str = "errors/timeout";
        let _handle = crate::add_hyper_fixture(PATH, |_req| async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            (Response::new(Full::new(Bytes::new())), Ok(()))
        });

        let transport = ReqwestTransport::new(TransportOptions {
            request_timeout: Some(Duration::from_millis(200)),
            ..Default::default()
        })
        .unwrap();
        let client = Client::builder().transport(transport).build().unwrap();
        let err = client.begin().get().at(crate::fixture_url(PATH)).unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::RequestTimeout)));
    }

    #[test]
    fn test_dispatch_after_shutdown() {
        const PATH: &str = "errors/shutdown";
        let _handle = crate::add_hyper_fixture(PATH, |_req| async move {
            (
                Response::new(Full::new(Bytes::from("1"))),
                Err("request should not have been sent".to_string()),
            )
        });

        let pool = Arc::new(ThreadPoolExecutor::with_threads(NonZeroUsize::MIN).unwrap());
        let client = Client::builder()
            .transport(ReqwestTransport::new(TransportOptions::default()).unwrap())
            .executor(Arc::clone(&pool))
            .build()
            .unwrap();
        pool.shutdown();

        let err = dispatch_i32(&client, crate::fixture_url(PATH)).unwrap_err();
        assert!(matches!(
            err,
            Error::DispatchRejected(RejectReason::ShutDown)
        ));
    }
}
