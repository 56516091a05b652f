use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::error::ValidationError;
use crate::Method;

/// An immutable snapshot of a request under construction.
///
/// Each configuration step produces a new descriptor from the previous one plus a single
/// change, so a step that has been cloned keeps its own lineage. Two chains configured the same
/// way produce equal descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    url: Option<Url>,
    verb: Option<Method>,
    headers: BTreeMap<String, String>,
    query_params: BTreeMap<String, String>,
    body: Option<Value>,
}

impl RequestDescriptor {
    pub(crate) fn with_default_headers(headers: &BTreeMap<String, String>) -> Self {
        Self {
            headers: headers.clone(),
            ..Default::default()
        }
    }

    /// The target URL, once set.
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// The HTTP verb, once set.
    pub fn verb(&self) -> Option<&Method> {
        self.verb.as_ref()
    }

    /// Request headers, case-sensitive as stored.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Query parameters appended to the URL.
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    /// The request body document, if any.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Whether a body is attached.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub(crate) fn with_url(&self, url: Url) -> Self {
        Self {
            url: Some(url),
            ..self.clone()
        }
    }

    pub(crate) fn with_verb(&self, verb: Method) -> Self {
        Self {
            verb: Some(verb),
            ..self.clone()
        }
    }

    pub(crate) fn with_header(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.clone();
        headers.insert(key.into(), value.into());
        Self {
            headers,
            ..self.clone()
        }
    }

    pub(crate) fn with_query_param(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut query_params = self.query_params.clone();
        query_params.insert(key.into(), value.into());
        Self {
            query_params,
            ..self.clone()
        }
    }

    pub(crate) fn with_body(&self, body: Value) -> Self {
        Self {
            body: Some(body),
            ..self.clone()
        }
    }

    /// Checks that the descriptor can be executed and returns its verb and URL.
    pub fn check_valid(&self) -> Result<(&Method, &Url), ValidationError> {
        let verb = self.verb.as_ref().ok_or(ValidationError::MissingVerb)?;
        let url = self.url.as_ref().ok_or(ValidationError::MissingUrl)?;
        Ok((verb, url))
    }
}
