use std::borrow::Cow;
use std::fmt;

use stepwise_interface::Method as MethodImpl;
use url::Url;

use crate::error::ValidationError;

/// HTTP verb of a request: one of the four standard verbs or a custom one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    inner: MethodImpl,
}

impl Method {
    /// A verb outside the standard four, sent verbatim.
    ///
    /// Prefer [`crate::steps::Initial::custom_verb`], which rejects empty names.
    pub fn custom(method: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner: MethodImpl::Other(method.into()),
        }
    }

    /// The `GET` verb.
    pub fn get() -> Self {
        Self {
            inner: MethodImpl::Get,
        }
    }

    /// The `POST` verb.
    pub fn post() -> Self {
        Self {
            inner: MethodImpl::Post,
        }
    }

    /// The `PUT` verb.
    pub fn put() -> Self {
        Self {
            inner: MethodImpl::Put,
        }
    }

    /// The `DELETE` verb.
    pub fn delete() -> Self {
        Self {
            inner: MethodImpl::Delete,
        }
    }

    /// Whether this is a custom verb.
    pub fn is_custom(&self) -> bool {
        matches!(self.inner, MethodImpl::Other(_))
    }

    /// The verb name as sent on the wire.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    pub(crate) fn to_impl(&self) -> MethodImpl {
        self.inner.clone()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A value that can be turned into an absolute request URL.
///
/// Implemented for [`Url`] and for strings, which are parsed on conversion. This trait is
/// sealed.
pub trait IntoUrl: sealed::Sealed {
    /// Converts the value, rejecting empty and relative URLs.
    #[doc(hidden)]
    fn into_url(self) -> Result<Url, ValidationError>;
}

impl sealed::Sealed for Url {}
impl IntoUrl for Url {
    fn into_url(self) -> Result<Url, ValidationError> {
        Ok(self)
    }
}

impl sealed::Sealed for &Url {}
impl IntoUrl for &Url {
    fn into_url(self) -> Result<Url, ValidationError> {
        Ok(self.clone())
    }
}

impl sealed::Sealed for &str {}
impl IntoUrl for &str {
    fn into_url(self) -> Result<Url, ValidationError> {
        if self.trim().is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Url::parse(self).map_err(|source| ValidationError::InvalidUrl {
            url: self.to_owned(),
            source,
        })
    }
}

impl sealed::Sealed for &String {}
impl IntoUrl for &String {
    fn into_url(self) -> Result<Url, ValidationError> {
        self.as_str().into_url()
    }
}

impl sealed::Sealed for String {}
impl IntoUrl for String {
    fn into_url(self) -> Result<Url, ValidationError> {
        self.as_str().into_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(Method::get().as_str(), "GET");
        assert_eq!(Method::post().to_string(), "POST");
        assert_eq!(Method::custom("PATCH").as_str(), "PATCH");
        assert!(Method::custom("PATCH").is_custom());
        assert!(!Method::delete().is_custom());
        assert_ne!(Method::custom("GET"), Method::get());
    }

    #[test]
    fn test_into_url() {
        let url = "https://example.com/a?b=c".into_url().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));

        assert_eq!("".into_url(), Err(ValidationError::EmptyUrl));
        assert_eq!("   ".to_string().into_url(), Err(ValidationError::EmptyUrl));
        assert!(matches!(
            "/relative/path".into_url(),
            Err(ValidationError::InvalidUrl { .. })
        ));
    }
}
