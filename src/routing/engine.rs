//! The seam between the route table and a routing engine.
//!
//! A routing engine is anything that can take `(method, pattern, handler)`
//! triples and match requests against them. The route table never talks to
//! an engine directly: it hands over a [`Registration`], which the engine
//! replays into one of its own route groups.

use std::sync::Arc;

use crate::routing::handler::SharedHandler;
use crate::routing::router::RouteEntry;
use crate::routing::{Domain, HttpMethod};

/// A group of routes inside an engine, as seen by a [`Registration`].
pub trait RouteGroup {
    type Error;

    /// Add one route. Patterns are passed through exactly as configured.
    fn map(
        &mut self,
        method: HttpMethod,
        pattern: &str,
        handler: SharedHandler,
    ) -> Result<(), Self::Error>;
}

/// A routing engine constructed from a domain and a registration.
pub trait RoutingEngine: Sized {
    type Error;

    fn mount(domain: &Domain, registration: Registration) -> Result<Self, Self::Error>;
}

/// Replays a validated route table into a [`RouteGroup`].
///
/// Cheap to clone; the entries are shared.
#[derive(Clone)]
pub struct Registration {
    entries: Arc<[RouteEntry]>,
}

impl Registration {
    pub(crate) fn new(entries: Arc<[RouteEntry]>) -> Self {
        Self { entries }
    }

    /// Map every entry into `group`, in table order.
    ///
    /// No validation happens here; the first error the group reports is
    /// returned and the remaining entries are not mapped.
    pub fn register<G: RouteGroup + ?Sized>(&self, group: &mut G) -> Result<(), G::Error> {
        for entry in self.entries.iter() {
            tracing::trace!(method = %entry.method, pattern = %entry.pattern, "Mapping route");
            group.map(entry.method, &entry.pattern, entry.handler.clone())?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("routes", &self.entries.len())
            .finish()
    }
}
