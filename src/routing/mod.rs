//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     ConfigSource (path | JSON text | value)
//!     → config::loader (normalize)
//!     → config::validation (domain, fields, methods)
//!     → router.rs (resolve controllers via handler.rs)
//!     → RouteTable (ordered, immutable)
//!     → engine.rs (Registration replayed into a RoutingEngine)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Registration order is preserved end to end
//! - The engine is a trait; `http::server::AxumEngine` is the bundled one

pub mod domain;
pub mod engine;
pub mod handler;
pub mod matcher;
pub mod method;
pub mod router;

pub use domain::{Domain, Scheme};
pub use engine::{Registration, RouteGroup, RoutingEngine};
pub use handler::{Handler, HandlerRegistry, HandlerRequest, HandlerResult, SharedHandler};
pub use method::HttpMethod;
pub use router::{build, check, mount, MountError, RouteEntry, RouteTable};
