#[cfg(test)]
mod tests {
    use hyper::{header::CONTENT_TYPE, StatusCode};
    use stepwise::Error;

    use crate::*;

    #[test]
    fn test_download() {
        const PATH: &str = "download/file.bin";
        const PAYLOAD: &[u8] = &[0, 159, 146, 150, 255];
        let _handle = crate::add_hyper_fixture(PATH, |req| async move {
            let result = if req.mode().is_some() || req.headers().contains_key(CONTENT_TYPE) {
                Err(format!("default headers leaked: {:?}", req.headers()))
            } else {
                Ok(())
            };
            (Response::new(Full::new(Bytes::from_static(PAYLOAD))), result)
        });

        let client = crate::init_client(ExecutionModeHeader::Blocking);
        let bytes = client.begin().download(crate::fixture_url(PATH)).unwrap();
        assert_eq!(bytes, PAYLOAD);
    }

    #[test]
    fn test_download_not_found() {
        const PATH: &str = "download/missing.bin";
        let _handle = crate::add_hyper_fixture(PATH, |_req| async move {
            let res = Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Full::new(Bytes::new()))
                .unwrap();
            (res, Ok(()))
        });

        let client = crate::init_client(ExecutionModeHeader::Blocking);
        match client.begin().download(crate::fixture_url(PATH)) {
            Err(Error::NonSuccessfulStatusCode(status)) => assert_eq!(status, 404),
            other => panic!("expected NonSuccessfulStatusCode, got {other:?}"),
        }
    }
}
