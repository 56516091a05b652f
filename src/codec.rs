//! Serialization of request and response bodies.
//!
//! The engine speaks [`serde_json::Value`] internally. A [`Codec`] turns that document model
//! into bytes for the transport and back. [`JsonCodec`] is used unless the client builder is
//! given another codec.

use std::error::Error as StdError;

use serde_json::Value;

/// Error type reported by a [`Codec`].
pub type CodecError = Box<dyn StdError + Send + Sync>;

/// Converts between the document model and wire bytes.
pub trait Codec: Send + Sync + 'static {
    /// Content type of the encoded bytes.
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    /// Encodes a request body.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Parses a response body.
    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError>;
}

/// The default codec, backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_codec() {
        let codec = JsonCodec;
        assert_eq!(codec.content_type(), "application/json");

        let bytes = codec.encode(&json!({"name": "Ann"})).unwrap();
        assert_eq!(bytes, br#"{"name":"Ann"}"#);

        assert_eq!(codec.decode(b"42").unwrap(), json!(42));
        assert!(codec.decode(b"{not json").is_err());
    }
}
