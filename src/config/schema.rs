//! Configuration schema definitions.
//!
//! These types describe the raw document as it arrives, before any semantic
//! checks. Route fields are kept as loose JSON values so that validation can
//! report exactly which field of which entry is missing or wrong.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root of a route configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfigDocument {
    /// Domain the routes are mounted under.
    pub domain: DomainConfig,

    /// Route entries, in registration order.
    pub routes: Vec<RouteConfig>,
}

/// Raw domain descriptor.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DomainConfig {
    /// URL scheme, `http` or `https`.
    pub scheme: String,

    /// Host, optionally with port and path (e.g. `api.example.com:8443/v1`).
    pub host: String,
}

/// Raw route entry.
///
/// A field that is absent or `null` deserializes to `None`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RouteConfig {
    /// HTTP method (e.g. `"GET"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,

    /// Route pattern handed to the routing engine (e.g. `"/users/{id:number}"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Value>,

    /// Name of the controller that handles the route (e.g. `"Users::show"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<Value>,
}

impl RouteConfig {
    /// Convenience constructor for fully populated entries.
    pub fn new(method: &str, route: &str, controller: &str) -> Self {
        Self {
            method: Some(Value::from(method)),
            route: Some(Value::from(route)),
            controller: Some(Value::from(controller)),
        }
    }
}
