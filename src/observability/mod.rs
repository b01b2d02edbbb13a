//! Observability subsystem.
//!
//! All modules log through `tracing`; this module only installs the
//! subscriber for binaries.

pub mod logging;

pub use logging::init_logging;
