//! Plain-data request handed to a transport.

use std::borrow::Cow;
use std::fmt;

/// HTTP request method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// DELETE method
    Delete,
    /// Any other method, carried by name
    Other(Cow<'static, str>),
}

impl Method {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Other(name) => name,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    /// The encoded content.
    pub content: Vec<u8>,
    /// Content type of `content`. Transports send it only when the request headers do not
    /// already carry a `Content-Type`.
    pub content_type: Cow<'static, str>,
}

/// A fully resolved HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,
    /// The absolute request URL, without the query parameters below.
    pub url: String,
    /// Request headers, exactly as configured by the caller.
    pub headers: Vec<(String, String)>,
    /// Query parameters to append to the URL.
    pub query_params: Vec<(String, String)>,
    /// Optional encoded body.
    pub body: Option<Body>,
}

impl Request {
    /// Creates a request without headers, query parameters or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: vec![],
            query_params: vec![],
            body: None,
        }
    }

    /// Returns the first value of `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Other("PATCH".into()).as_str(), "PATCH");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut req = Request::new(Method::Get, "http://localhost/");
        req.headers.push(("Content-Type".into(), "application/json".into()));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }
}
