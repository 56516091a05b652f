#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use hyper::Method;
    use serde::Deserialize;

    use crate::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Greeting {
        message: String,
    }

    #[test]
    fn test_get_json() {
        const PATH: &str = "get_json/greeting";
        let _handle = crate::add_hyper_fixture(PATH, |req| async move {
            let body = r#"{"message": "Hello, world!"}"#;
            let res = Response::new(Full::new(Bytes::from(body)));
            let result = (req.method() == Method::GET)
                .then_some(())
                .ok_or_else(|| format!("unexpected method {}", req.method()));
            (res, result)
        });

        let client = crate::init_client(ExecutionModeHeader::Blocking);
        let greeting = client
            .begin()
            .get()
            .expecting::<Greeting>()
            .unwrap()
            .at(crate::fixture_url(PATH))
            .unwrap();
        assert_eq!(greeting.message, "Hello, world!");

        let client = crate::init_client(ExecutionModeHeader::Callback);
        let (tx, rx) = mpsc::channel();
        let failure_tx = tx.clone();
        client
            .begin()
            .get()
            .expecting::<Greeting>()
            .unwrap()
            .on_success(move |greeting| {
                let worker = thread::current().name().map(str::to_owned);
                tx.send(Ok((greeting, worker))).unwrap()
            })
            .on_failure(move |err| failure_tx.send(Err(err.to_string())).unwrap())
            .at(crate::fixture_url(PATH))
            .unwrap();
        let (greeting, worker) = crate::recv_callback(&rx).unwrap();
        assert_eq!(greeting.message, "Hello, world!");
        assert!(worker.unwrap().starts_with("stepwise-worker-"));
    }

    #[test]
    fn test_get_scalar() {
        const PATH: &str = "get_json/scalar";
        let _handle = crate::add_hyper_fixture(PATH, |_req| async move {
            (Response::new(Full::new(Bytes::from("42"))), Ok(()))
        });

        let client = crate::init_client(ExecutionModeHeader::Blocking);
        let answer = client
            .begin()
            .get()
            .expecting::<i32>()
            .unwrap()
            .at(crate::fixture_url(PATH))
            .unwrap();
        assert_eq!(answer, 42);

        let text = client
            .begin()
            .get()
            .expecting::<String>()
            .unwrap()
            .at(crate::fixture_url(PATH))
            .unwrap();
        assert_eq!(text, "42");
    }
}
