use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use stepwise_interface::{Method, Request};
use url::Url;

use crate::error::{ReqwestBackendError, Result};

pub(crate) fn convert_method(method: &Method) -> Result<reqwest::Method> {
    Ok(match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Other(other) => reqwest::Method::from_bytes(other.as_bytes())
            .map_err(|_| ReqwestBackendError::InvalidMethod(other.to_string()))?,
    })
}

fn convert_header(key: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|_| ReqwestBackendError::InvalidHeaderName(key.into()))?;
    let value = HeaderValue::from_str(value)
        .map_err(|_| ReqwestBackendError::InvalidHeaderValue(key.into()))?;
    Ok((name, value))
}

pub(crate) fn build_request(client: &Client, req: Request) -> Result<RequestBuilder> {
    let url = Url::parse(&req.url).map_err(|_| ReqwestBackendError::InvalidUrl(req.url.clone()))?;
    let method = convert_method(&req.method)?;
    let has_content_type = req.header(CONTENT_TYPE.as_str()).is_some();

    let mut request_builder = client.request(method, url);
    for (key, value) in &req.headers {
        let (name, value) = convert_header(key, value)?;
        request_builder = request_builder.header(name, value);
    }
    if !req.query_params.is_empty() {
        request_builder = request_builder.query(&req.query_params);
    }
    if let Some(body) = req.body {
        if !has_content_type {
            request_builder = request_builder.header(CONTENT_TYPE, &*body.content_type);
        }
        request_builder = request_builder.body(body.content);
    }
    Ok(request_builder)
}
