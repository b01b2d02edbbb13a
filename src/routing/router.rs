//! Route table construction.
//!
//! # Responsibilities
//! - Load, normalize and validate configuration
//! - Resolve controller names to handlers
//! - Freeze the result as an ordered, immutable [`RouteTable`]
//! - Hand the table to a routing engine
//!
//! # Design Decisions
//! - Input order is preserved exactly; engines may give it precedence
//! - Nothing reaches the engine unless the whole configuration is valid
//! - Duplicate `(method, pattern)` pairs are left to the engine

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::loader::{load, ConfigSource};
use crate::config::validation::{validate, ValidatedConfig};
use crate::config::ConfigError;
use crate::routing::engine::{Registration, RoutingEngine};
use crate::routing::handler::{HandlerRegistry, SharedHandler};
use crate::routing::{Domain, HttpMethod};

/// One validated route with its handler resolved.
#[derive(Clone)]
pub struct RouteEntry {
    pub method: HttpMethod,
    pub pattern: String,
    /// Controller name as written in the configuration.
    pub controller: String,
    pub handler: SharedHandler,
}

impl PartialEq for RouteEntry {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
            && self.pattern == other.pattern
            && self.controller == other.controller
            && std::ptr::addr_eq(Arc::as_ptr(&self.handler), Arc::as_ptr(&other.handler))
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// Ordered, validated route table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    domain: Domain,
    entries: Arc<[RouteEntry]>,
}

impl RouteTable {
    /// Resolve the controllers of a validated configuration.
    pub fn resolve(
        config: ValidatedConfig,
        registry: &HandlerRegistry,
    ) -> Result<Self, ConfigError> {
        let entries = config
            .routes
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                let handler = registry.resolve(&spec.controller).ok_or_else(|| {
                    ConfigError::UnknownController {
                        controller: spec.controller.clone(),
                        index,
                    }
                })?;
                Ok(RouteEntry {
                    method: spec.method,
                    pattern: spec.pattern,
                    controller: spec.controller,
                    handler,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            domain: config.domain,
            entries: entries.into(),
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registration callback handed to a routing engine.
    pub fn registration(&self) -> Registration {
        Registration::new(self.entries.clone())
    }
}

/// Failure to mount a configuration on an engine.
#[derive(Debug, Error)]
pub enum MountError<E> {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("routing engine rejected the route table: {0}")]
    Engine(E),
}

/// Load and validate a configuration without resolving controllers.
pub fn check(source: impl Into<ConfigSource>) -> Result<ValidatedConfig, ConfigError> {
    let document = load(source)?;
    validate(&document)
}

/// Build a route table from any configuration source.
pub fn build(
    source: impl Into<ConfigSource>,
    registry: &HandlerRegistry,
) -> Result<RouteTable, ConfigError> {
    let validated = check(source)?;
    let table = RouteTable::resolve(validated, registry)?;

    tracing::info!(
        domain = %table.domain(),
        routes = table.len(),
        "Route table built"
    );
    for entry in table.iter() {
        tracing::debug!(
            method = %entry.method,
            pattern = %entry.pattern,
            controller = %entry.controller,
            "Route"
        );
    }

    Ok(table)
}

/// Build a route table and mount it on engine `E`.
pub fn mount<E: RoutingEngine>(
    source: impl Into<ConfigSource>,
    registry: &HandlerRegistry,
) -> Result<E, MountError<E::Error>> {
    let table = build(source, registry)?;
    E::mount(table.domain(), table.registration()).map_err(MountError::Engine)
}
