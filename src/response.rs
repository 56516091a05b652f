use std::fmt;

use serde::de::DeserializeOwned;
use stepwise_interface::RawResponse;

use crate::codec::JsonCodec;
use crate::decode::decode_json;
use crate::error::DecodeError;
use crate::StatusCode;

/// The untyped envelope of a completed HTTP round-trip.
///
/// Expecting [`Response`] as the result of a chain skips decoding entirely. A response is
/// returned for every status code the transport reports, 4xx and 5xx included.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Get the `StatusCode` of this Response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Return the response as-is, or [`crate::Error::NonSuccessfulStatusCode`] if the status code
    /// does not indicate success.
    #[inline]
    pub fn with_successful_status(self) -> crate::Result<Self> {
        let status = self.status();
        if status.is_successful() {
            Ok(self)
        } else {
            Err(crate::Error::NonSuccessfulStatusCode(status))
        }
    }

    /// All response headers in the order received.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Get the response values of the specified header, compared case-insensitively.
    ///
    /// Multiple values are returned if the header is present multiple times.
    pub fn get_header(&self, header: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(header))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the response and take the body bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// The body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON, with the same scalar coercion as typed chains.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        decode_json(&self.body, &JsonCodec)
    }
}

impl From<RawResponse> for Response {
    fn from(raw: RawResponse) -> Self {
        Self {
            status: StatusCode::new(raw.status),
            headers: raw.headers,
            body: raw.body,
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> Response {
        RawResponse::new(status, body)
            .with_header("Content-Type", "application/json")
            .with_header("Set-Cookie", "a=1")
            .with_header("set-cookie", "b=2")
            .into()
    }

    #[test]
    fn test_get_header_case_insensitive() {
        let response = response(200, "{}");
        assert_eq!(response.get_header("content-type"), ["application/json"]);
        assert_eq!(response.get_header("SET-COOKIE"), ["a=1", "b=2"]);
        assert!(response.get_header("X-Missing").is_empty());
    }

    #[test]
    fn test_with_successful_status() {
        assert!(response(204, "").with_successful_status().is_ok());
        let err = response(404, "").with_successful_status().unwrap_err();
        assert!(matches!(err, crate::Error::NonSuccessfulStatusCode(s) if s == 404));
    }

    #[test]
    fn test_body_accessors() {
        let response = response(500, r#"{"error":"boom"}"#);
        assert_eq!(response.status(), 500);
        assert_eq!(response.text(), r#"{"error":"boom"}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["error"], "boom");
        assert_eq!(response.into_bytes(), br#"{"error":"boom"}"#);
    }
}
