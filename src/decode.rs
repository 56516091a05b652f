//! Conversion of raw responses into caller-declared types.
//!
//! [`Response`] is passed through untouched. Every other target goes through the client's
//! [`Codec`] into a [`serde_json::Value`] and from there into the target with serde.
//!
//! Scalar targets are lenient the way JSON APIs tend to need: a quoted number or boolean
//! decodes into a numeric or boolean target, and a bare number or boolean decodes into a
//! string target.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

use crate::codec::Codec;
use crate::error::DecodeError;
use crate::Response;

/// A type a request chain can produce from a completed response.
///
/// Implemented for [`Response`] and for every type implementing [`serde::Deserialize`].
pub trait FromResponse: Sized + Send + 'static {
    /// Converts `response` using `codec` to parse its body.
    fn from_response(response: Response, codec: &dyn Codec) -> Result<Self, DecodeError>;
}

impl FromResponse for Response {
    fn from_response(response: Response, _codec: &dyn Codec) -> Result<Self, DecodeError> {
        Ok(response)
    }
}

impl<T: DeserializeOwned + Send + 'static> FromResponse for T {
    fn from_response(response: Response, codec: &dyn Codec) -> Result<Self, DecodeError> {
        decode_json(response.body(), codec)
    }
}

pub(crate) fn decode_json<T: DeserializeOwned>(
    body: &[u8],
    codec: &dyn Codec,
) -> Result<T, DecodeError> {
    let value = codec.decode(body).map_err(|source| DecodeError::Malformed {
        source,
        body: body.to_vec(),
    })?;
    match T::deserialize(&value) {
        Ok(decoded) => Ok(decoded),
        Err(source) => coerce_scalar(&value)
            .and_then(|alternate| T::deserialize(&alternate).ok())
            .ok_or_else(|| DecodeError::Mismatch {
                target: type_name::<T>(),
                source,
                body: body.to_vec(),
            }),
    }
}

/// The alternate scalar form of `value`, if it has one.
fn coerce_scalar(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(b) = s.parse::<bool>() {
                Some(Value::Bool(b))
            } else if let Ok(n) = s.parse::<i64>() {
                Some(n.into())
            } else if let Ok(n) = s.parse::<u64>() {
                Some(n.into())
            } else {
                s.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            }
        }
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}
