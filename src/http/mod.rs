//! HTTP-facing side of the router.
//!
//! # Data Flow
//! ```text
//! Registration
//!     → server.rs (axum engine: match, check constraints, dispatch)
//!     → handler
//!         → Ok(Envelope)          → response.rs (pretty JSON, status line)
//!         → Err(raise(status))    → errors.rs (catalog condition → envelope)
//! ```

pub mod errors;
pub mod response;
pub mod server;

pub use errors::{raise, CatalogEntry, HttpError, RaiseError};
pub use response::{dispatch, Envelope};
pub use server::{AxumEngine, EngineError};
