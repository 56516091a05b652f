//! The typestate request chain.
//!
//! Each stage of building a request is its own type, and each type only offers the calls that
//! are legal at that point:
//!
//! ```text
//! Initial ──verb──▶ Configuring ──expecting::<T>()──▶ TypedConfiguring<T>
//!                       │   └──at(url)──▶ Response          │   └──at(url)──▶ T
//!                       └──on_success──┐                    └──on_success──┐
//!                                      ▼                                   ▼
//!                             AwaitingFailure<T> ──on_failure──▶ ReadyForDispatch<T> ──at(url)
//! ```
//!
//! Every call returns a new step holding a new [`RequestDescriptor`]; steps that are cloned
//! continue independently. Contract violations are reported synchronously as
//! [`Error::Validation`](crate::Error::Validation) by the call that commits them.

use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::callback::{Callbacks, OnSuccess};
use crate::decode::FromResponse;
use crate::engine::{Engine, ExecutionMode};
use crate::error::ValidationError;
use crate::{Error, IntoUrl, Method, RequestDescriptor, Response, Result};

/// Redirect limit used by [`Configuring::follow_redirects_default`].
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

fn wrap<S: fmt::Debug>(step: S) -> S {
    debug!("{step:?}");
    step
}

// ///////////////////////////////////////////////////////////////////////////////////////// INITIAL

/// The first step of a chain, obtained from [`crate::Client::begin`].
///
/// Attach an optional body, then pick a verb.
#[derive(Clone)]
pub struct Initial {
    engine: Arc<Engine>,
    descriptor: RequestDescriptor,
}

impl Initial {
    pub(crate) fn new(engine: Arc<Engine>, descriptor: RequestDescriptor) -> Self {
        wrap(Self { engine, descriptor })
    }

    /// The request described so far.
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Use the `GET` verb.
    pub fn get(self) -> Configuring {
        self.verb(Method::get())
    }

    /// Use the `POST` verb.
    pub fn post(self) -> Configuring {
        self.verb(Method::post())
    }

    /// Use the `PUT` verb.
    pub fn put(self) -> Configuring {
        self.verb(Method::put())
    }

    /// Use the `DELETE` verb.
    pub fn delete(self) -> Configuring {
        self.verb(Method::delete())
    }

    /// Use a verb outside the standard four, such as `PATCH`. The name must not be blank.
    pub fn custom_verb(self, name: impl Into<Cow<'static, str>>) -> Result<Configuring> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyVerb.into());
        }
        Ok(self.verb(Method::custom(name)))
    }

    fn verb(self, verb: Method) -> Configuring {
        Configuring::new(self.engine, self.descriptor.with_verb(verb))
    }

    /// Attach any serializable value as the request body.
    ///
    /// Values that serialize to `null` are rejected as an empty body.
    pub fn body<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ValidationError::InvalidBody(e.to_string()))?;
        self.with_body(value)
    }

    /// Attach a raw JSON document as the request body.
    pub fn json_body(self, json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(ValidationError::EmptyBody.into());
        }
        let value = serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidBody(e.to_string()))?;
        self.with_body(value)
    }

    /// Attach `{"<key>": "<value>"}` as the request body.
    pub fn body_with_key_value(
        self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::EmptyBodyKey.into());
        }
        let mut object = serde_json::Map::new();
        object.insert(key, Value::String(value.into()));
        self.with_body(Value::Object(object))
    }

    fn with_body(self, value: Value) -> Result<Self> {
        if value.is_null() {
            return Err(ValidationError::EmptyBody.into());
        }
        Ok(Self::new(self.engine, self.descriptor.with_body(value)))
    }

    /// Download `url` with a plain `GET` and return the body bytes.
    ///
    /// This bypasses the chain: no default headers, query parameters or body are sent. A
    /// non-2xx answer is reported as [`Error::NonSuccessfulStatusCode`].
    pub fn download(&self, url: impl IntoUrl) -> Result<Vec<u8>> {
        let url = url.into_url()?;
        self.engine.download(&url)
    }
}

impl fmt::Debug for Initial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Initial")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

// ///////////////////////////////////////////////////////////////////////////////////// CONFIGURING

/// A chain with a verb, ready for headers and query parameters.
#[derive(Clone)]
pub struct Configuring {
    engine: Arc<Engine>,
    descriptor: RequestDescriptor,
    max_redirects: Option<u32>,
}

impl Configuring {
    fn new(engine: Arc<Engine>, descriptor: RequestDescriptor) -> Self {
        wrap(Self {
            engine,
            descriptor,
            max_redirects: None,
        })
    }

    fn map(self, f: impl FnOnce(&RequestDescriptor) -> RequestDescriptor) -> Self {
        wrap(Self {
            descriptor: f(&self.descriptor),
            ..self
        })
    }

    /// The request described so far.
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Set a header, replacing a default or earlier value under the same key.
    ///
    /// The key must not be empty; the value may be.
    pub fn using_header(self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::EmptyHeaderKey.into());
        }
        Ok(self.map(|d| d.with_header(key, value)))
    }

    /// Set a query parameter, replacing an earlier value under the same key.
    pub fn using_query_param(
        self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::EmptyQueryKey.into());
        }
        Ok(self.map(|d| d.with_query_param(key, value)))
    }

    /// Record a redirect limit. Must be at least 1.
    ///
    /// The limit is stored but does not change how requests execute; redirects are entirely up
    /// to the transport.
    pub fn follow_redirects(self, max: u32) -> Result<Self> {
        if max < 1 {
            return Err(ValidationError::InvalidRedirectLimit(max).into());
        }
        warn!("Redirect limit {max} recorded but not applied; the transport decides on redirects");
        Ok(wrap(Self {
            max_redirects: Some(max),
            ..self
        }))
    }

    /// Record the default redirect limit of [`DEFAULT_MAX_REDIRECTS`].
    pub fn follow_redirects_default(self) -> Self {
        warn!("Redirect limit {DEFAULT_MAX_REDIRECTS} recorded but not applied; the transport decides on redirects");
        wrap(Self {
            max_redirects: Some(DEFAULT_MAX_REDIRECTS),
            ..self
        })
    }

    /// The redirect limit recorded with [`Configuring::follow_redirects`], if any.
    pub fn max_redirects(&self) -> Option<u32> {
        self.max_redirects
    }

    /// Send the request to `url`, blocking until the response arrives.
    pub fn at(self, url: impl IntoUrl) -> Result<Response> {
        let url = url.into_url()?;
        self.engine
            .execute(&self.descriptor.with_url(url), ExecutionMode::Sync)
    }

    /// Deliver the response to `on_success` instead of returning it.
    pub fn on_success<F>(self, on_success: F) -> AwaitingFailure<Response>
    where
        F: FnOnce(Response) + Send + 'static,
    {
        AwaitingFailure::new(self.engine, self.descriptor, Box::new(on_success))
    }

    /// Decode the response body into `T`.
    ///
    /// `T` may be [`Response`] itself or any deserializable type except `()`.
    pub fn expecting<T: FromResponse>(self) -> Result<TypedConfiguring<T>> {
        if TypeId::of::<T>() == TypeId::of::<()>() {
            return Err(ValidationError::UnitResponseType.into());
        }
        Ok(TypedConfiguring::new(self.engine, self.descriptor))
    }
}

impl fmt::Debug for Configuring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuring")
            .field("descriptor", &self.descriptor)
            .field("max_redirects", &self.max_redirects)
            .finish()
    }
}

// /////////////////////////////////////////////////////////////////////////////////////////// TYPED

/// A chain that decodes its response into `T`.
pub struct TypedConfiguring<T> {
    engine: Arc<Engine>,
    descriptor: RequestDescriptor,
    _ty: PhantomData<fn() -> T>,
}

impl<T: FromResponse> TypedConfiguring<T> {
    fn new(engine: Arc<Engine>, descriptor: RequestDescriptor) -> Self {
        wrap(Self {
            engine,
            descriptor,
            _ty: PhantomData,
        })
    }

    /// The request described so far.
    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Send the request to `url`, blocking until the decoded result is available.
    pub fn at(self, url: impl IntoUrl) -> Result<T> {
        let url = url.into_url()?;
        self.engine
            .execute(&self.descriptor.with_url(url), ExecutionMode::Sync)
    }

    /// Deliver the decoded result to `on_success` instead of returning it.
    pub fn on_success<F>(self, on_success: F) -> AwaitingFailure<T>
    where
        F: FnOnce(T) + Send + 'static,
    {
        AwaitingFailure::new(self.engine, self.descriptor, Box::new(on_success))
    }
}

impl<T> Clone for TypedConfiguring<T> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            descriptor: self.descriptor.clone(),
            _ty: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TypedConfiguring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedConfiguring")
            .field("target", &std::any::type_name::<T>())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

// //////////////////////////////////////////////////////////////////////////////////////// CALLBACK

/// A chain with a success callback that still needs a failure callback.
pub struct AwaitingFailure<T> {
    engine: Arc<Engine>,
    descriptor: RequestDescriptor,
    on_success: OnSuccess<T>,
}

impl<T: FromResponse> AwaitingFailure<T> {
    fn new(engine: Arc<Engine>, descriptor: RequestDescriptor, on_success: OnSuccess<T>) -> Self {
        wrap(Self {
            engine,
            descriptor,
            on_success,
        })
    }

    /// Receive the error if the request fails after dispatch.
    ///
    /// Validation errors never reach this callback; they are returned by the call that
    /// detects them.
    pub fn on_failure<F>(self, on_failure: F) -> ReadyForDispatch<T>
    where
        F: FnOnce(Error) + Send + 'static,
    {
        wrap(ReadyForDispatch {
            engine: self.engine,
            descriptor: self.descriptor,
            callbacks: Callbacks::new(self.on_success, Box::new(on_failure)),
        })
    }
}

impl<T> fmt::Debug for AwaitingFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwaitingFailure")
            .field("target", &std::any::type_name::<T>())
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

// //////////////////////////////////////////////////////////////////////////////////////// DISPATCH

/// A chain with both callbacks, ready to be sent in the background.
pub struct ReadyForDispatch<T> {
    engine: Arc<Engine>,
    descriptor: RequestDescriptor,
    callbacks: Callbacks<T>,
}

impl<T: FromResponse> ReadyForDispatch<T> {
    /// Send the request to `url` without waiting for it.
    ///
    /// Exactly one of the two callbacks runs once the request completes, normally on an
    /// executor thread. With async callbacks disabled on the client it runs on this thread
    /// before `at` returns. If the executor refuses the request, the failure callback receives
    /// [`Error::DispatchRejected`], possibly on this thread.
    ///
    /// An `Err` is returned only for validation errors, in which case neither callback runs.
    pub fn at(self, url: impl IntoUrl) -> Result<()> {
        let url = url.into_url()?;
        self.engine
            .dispatch(self.descriptor.with_url(url), self.callbacks)
    }
}

impl<T> fmt::Debug for ReadyForDispatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadyForDispatch")
            .field("target", &std::any::type_name::<T>())
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}
