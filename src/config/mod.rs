//! Route configuration.
//!
//! # Data Flow
//! ```text
//! path | JSON text | serde_json::Value
//!     → loader.rs (normalize into ConfigDocument)
//!     → validation.rs (semantic checks, first error wins)
//!     → ValidatedConfig (immutable)
//! ```
//!
//! # Design Decisions
//! - One canonical document shape regardless of input source
//! - Syntax errors (serde) are kept apart from semantic ones
//! - Validation never touches the routing engine

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, RouteField};
pub use loader::{load, ConfigSource};
pub use schema::{ConfigDocument, DomainConfig, RouteConfig};
pub use validation::{validate, RouteSpec, ValidatedConfig};
