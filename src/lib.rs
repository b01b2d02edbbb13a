//! Declarative JSON API router.
//!
//! Builds an HTTP route table from plain configuration data (a file, JSON
//! text or a `serde_json::Value`), validates it, and mounts it on a routing
//! engine. Responses are wrapped in a `{status, result}` JSON envelope and
//! handlers fail with conditions from a fixed error catalog.
//!
//! ```
//! use json_api_router::http::{AxumEngine, Envelope};
//! use json_api_router::routing::{mount, HandlerRegistry, HandlerRequest, HandlerResult};
//! use serde_json::json;
//!
//! async fn index(_request: HandlerRequest) -> HandlerResult {
//!     Ok(Envelope::ok(json!({ "ok": true })))
//! }
//!
//! let registry = HandlerRegistry::new().with("Home::index", index);
//! let engine: AxumEngine = mount(
//!     r#"{"domain":{"scheme":"http","host":"api.test"},
//!         "routes":[{"method":"GET","route":"/","controller":"Home::index"}]}"#,
//!     &registry,
//! )
//! .unwrap();
//! assert_eq!(engine.route_count(), 1);
//! ```

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::{ConfigError, ConfigSource};
pub use http::{dispatch, raise, AxumEngine, Envelope, HttpError, RaiseError};
pub use routing::{build, mount, HandlerRegistry, RouteTable};
