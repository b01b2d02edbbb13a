//! Axum routing engine.
//!
//! # Responsibilities
//! - Accept a [`Registration`] and turn it into an axum [`Router`]
//! - Enforce placeholder constraints before a handler runs
//! - Dispatch to handlers in registration order
//! - Render unmatched requests with the error catalog (404 / 405)
//!
//! # Design Decisions
//! - Every request walks the whole route list in registration order; the
//!   first route whose path, constraints and method match wins
//! - 405 only when some route matches the path but none the method
//! - Method matching is exact: `HEAD` is not served by `GET` routes
//! - Exact duplicate `(method, pattern)` pairs are rejected at mount
//! - Request bodies are buffered up to [`MAX_BODY_BYTES`]

use std::fmt;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::http::errors::HttpError;
use crate::routing::engine::{Registration, RouteGroup, RoutingEngine};
use crate::routing::handler::{HandlerRequest, SharedHandler};
use crate::routing::matcher::{PathPattern, PatternError};
use crate::routing::{Domain, HttpMethod};

/// Largest request body handed to a handler.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Route tables the axum engine refuses to mount.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("route {method} {pattern} is registered more than once")]
    Conflict { method: HttpMethod, pattern: String },
}

struct CompiledRoute {
    method: HttpMethod,
    pattern: PathPattern,
    handler: SharedHandler,
}

/// Route group that collects mapped routes in registration order.
#[derive(Default)]
pub struct AxumRouteGroup {
    routes: Vec<CompiledRoute>,
}

impl RouteGroup for AxumRouteGroup {
    type Error = EngineError;

    fn map(
        &mut self,
        method: HttpMethod,
        pattern: &str,
        handler: SharedHandler,
    ) -> Result<(), EngineError> {
        let pattern = PathPattern::parse(pattern)?;

        if self
            .routes
            .iter()
            .any(|r| r.method == method && r.pattern.as_str() == pattern.as_str())
        {
            return Err(EngineError::Conflict {
                method,
                pattern: pattern.as_str().to_string(),
            });
        }

        self.routes.push(CompiledRoute {
            method,
            pattern,
            handler,
        });
        Ok(())
    }
}

impl AxumRouteGroup {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build the axum router. Every path is handed to the route list.
    pub fn into_router(self) -> Router {
        let routes: Arc<[CompiledRoute]> = self.routes.into();
        Router::new().fallback(move |request: Request<Body>| dispatch(routes.clone(), request))
    }
}

/// A mounted route table served by axum.
///
/// Requests are matched against the configured routes in the order they
/// were declared. A `HEAD` request only reaches a route declared with
/// `HEAD`; against a `GET`-only path it answers 405.
pub struct AxumEngine {
    domain: Domain,
    routes: usize,
    router: Router,
}

impl RoutingEngine for AxumEngine {
    type Error = EngineError;

    fn mount(domain: &Domain, registration: Registration) -> Result<Self, EngineError> {
        let mut group = AxumRouteGroup::default();
        registration.register(&mut group)?;

        tracing::info!(
            domain = %domain,
            routes = group.len(),
            "Routes mounted on axum"
        );

        Ok(Self {
            domain: domain.clone(),
            routes: group.len(),
            router: group.into_router().layer(TraceLayer::new_for_http()),
        })
    }
}

impl AxumEngine {
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn route_count(&self) -> usize {
        self.routes
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn into_router(self) -> Router {
        self.router
    }
}

impl fmt::Debug for AxumEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxumEngine")
            .field("domain", &self.domain)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

/// Percent-decode captured path segments.
fn decode(raw: &[&str]) -> Result<Vec<String>, std::string::FromUtf8Error> {
    raw.iter()
        .map(|value| urlencoding::decode(value).map(|v| v.into_owned()))
        .collect()
}

/// Run the first route whose path, constraints and method match.
async fn dispatch(routes: Arc<[CompiledRoute]>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();
    let segments: Vec<&str> = path.strip_prefix('/').unwrap_or(path).split('/').collect();

    let mut other_method = false;
    let mut matched = None;
    for route in routes.iter() {
        let Some(raw) = route.pattern.capture(&segments) else {
            continue;
        };
        let values = match decode(&raw) {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Rejecting undecodable path");
                return HttpError::BadRequest.into_response();
            }
        };
        if !route.pattern.accepts(&values) {
            continue;
        }
        if route.method.matches(&parts.method) {
            matched = Some((route, values));
            break;
        }
        other_method = true;
    }

    let Some((route, values)) = matched else {
        let condition = if other_method {
            HttpError::MethodNotAllowed
        } else {
            HttpError::NotFound
        };
        tracing::debug!(
            method = %parts.method,
            path = %path,
            status = condition.status(),
            "No route matched"
        );
        return condition.into_response();
    };

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to read request body");
            return HttpError::BadRequest.into_response();
        }
    };

    tracing::debug!(
        method = %parts.method,
        path = %path,
        pattern = %route.pattern.as_str(),
        "Dispatching request"
    );

    let request = HandlerRequest {
        method: parts.method.clone(),
        path: path.to_string(),
        query: parts.uri.query().map(str::to_string),
        params: route.pattern.bind(&values),
        body,
    };

    match route.handler.call(request).await {
        Ok(envelope) => envelope.into_response(),
        Err(err) => err.into_response(),
    }
}
