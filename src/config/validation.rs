//! Configuration validation.
//!
//! # Responsibilities
//! - Check that `scheme://host` is an absolute URL
//! - Restrict the scheme to `http` / `https`
//! - Check every route entry carries `method`, `route` and `controller`
//! - Restrict methods to the fixed method set
//!
//! # Design Decisions
//! - Pure free functions over borrowed input, no shared state
//! - Stops at the first error; entries are checked in document order,
//!   each entry fully (fields, then method) before the next
//! - Patterns and controller names are not interpreted here

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::error::{ConfigError, RouteField};
use crate::config::schema::{ConfigDocument, RouteConfig};
use crate::routing::{Domain, HttpMethod, Scheme};

/// A route entry that passed validation. The controller is still a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    pub method: HttpMethod,
    pub pattern: String,
    pub controller: String,
}

/// A configuration document that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedConfig {
    pub domain: Domain,
    pub routes: Vec<RouteSpec>,
}

/// Validate a whole document.
pub fn validate(document: &ConfigDocument) -> Result<ValidatedConfig, ConfigError> {
    let domain = validate_domain(&document.domain.scheme, &document.domain.host)?;
    let routes = document
        .routes
        .iter()
        .enumerate()
        .map(|(index, route)| validate_route(index, route))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedConfig { domain, routes })
}

/// Parse `url` as an absolute URL with a non-empty host.
pub fn validate_url(url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(ConfigError::InvalidUrl(url.to_string())),
    }
}

/// Accept exactly `http` or `https`.
pub fn validate_scheme(scheme: &str) -> Result<Scheme, ConfigError> {
    match scheme {
        "http" => Ok(Scheme::Http),
        "https" => Ok(Scheme::Https),
        other => Err(ConfigError::InvalidScheme(other.to_string())),
    }
}

/// Validate a domain descriptor.
///
/// The URL grammar accepts any scheme and normalizes its case, so the scheme
/// is checked again on the parsed URL and must also equal the input verbatim.
pub fn validate_domain(scheme: &str, host: &str) -> Result<Domain, ConfigError> {
    let url = format!("{scheme}://{host}");
    let parsed = validate_url(&url)?;

    let validated = validate_scheme(parsed.scheme())?;
    if validated.as_str() != scheme {
        return Err(ConfigError::InvalidScheme(scheme.to_string()));
    }

    Ok(Domain {
        scheme: validated,
        host: host.to_string(),
    })
}

/// Validate one route entry at position `index`.
pub fn validate_route(index: usize, route: &RouteConfig) -> Result<RouteSpec, ConfigError> {
    let method = require(index, RouteField::Method, route.method.as_ref())?;
    let pattern = require(index, RouteField::Route, route.route.as_ref())?;
    let controller = require(index, RouteField::Controller, route.controller.as_ref())?;

    let method = method
        .as_str()
        .and_then(|m| m.parse::<HttpMethod>().ok())
        .ok_or_else(|| ConfigError::InvalidMethod {
            method: method.to_string(),
            index,
        })?;

    Ok(RouteSpec {
        method,
        pattern: expect_string(index, RouteField::Route, pattern)?,
        controller: expect_string(index, RouteField::Controller, controller)?,
    })
}

fn require(
    index: usize,
    field: RouteField,
    value: Option<&Value>,
) -> Result<&Value, ConfigError> {
    value.ok_or(ConfigError::MissingField { field, index })
}

fn expect_string(index: usize, field: RouteField, value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ConfigError::InvalidFieldType {
            field,
            index,
            expected: "string",
        })
}
