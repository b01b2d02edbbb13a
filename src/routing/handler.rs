//! Controller handlers and the registry that resolves controller names.
//!
//! Route configuration names its controllers with plain strings such as
//! `"Users::show"`. Those names are resolved against a [`HandlerRegistry`]
//! once, while the route table is built, so an unknown controller fails
//! startup instead of the first request that hits it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::errors::{HttpError, RaiseError};
use crate::http::response::Envelope;

/// What a handler produces: an envelope, or a catalog condition.
pub type HandlerResult = Result<Envelope<Value>, RaiseError>;

/// Boxed future returned by [`Handler::call`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;

/// Shared, type-erased handler.
pub type SharedHandler = Arc<dyn Handler>;

/// An invocable controller.
///
/// Implemented for every `Fn(HandlerRequest) -> impl Future<Output = HandlerResult>`.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: HandlerRequest) -> HandlerFuture;
}

impl<F, Fut> Handler for F
where
    F: Fn(HandlerRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, request: HandlerRequest) -> HandlerFuture {
        Box::pin(self(request))
    }
}

/// The parts of a request a handler gets to see.
#[derive(Debug, Clone, Default)]
pub struct HandlerRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub params: HashMap<String, String>,
    pub body: Bytes,
}

impl HandlerRequest {
    /// Named path parameter, e.g. `id` for `/users/{id}`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Decode the body as JSON. A body that does not decode is a bad request.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RaiseError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            tracing::debug!(path = %self.path, error = %e, "Rejecting undecodable body");
            RaiseError::Http(HttpError::BadRequest)
        })
    }
}

/// Maps controller names to handlers.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, SharedHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler.
    pub fn register<H: Handler>(&mut self, name: impl Into<String>, handler: H) -> &mut Self {
        let name = name.into();
        if self.handlers.insert(name.clone(), Arc::new(handler)).is_some() {
            tracing::warn!(controller = %name, "Controller registered twice, keeping the latest");
        }
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<H: Handler>(mut self, name: impl Into<String>, handler: H) -> Self {
        self.register(name, handler);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<SharedHandler> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered controller names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
