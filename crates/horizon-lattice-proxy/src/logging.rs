//! Logging facilities for proxy objects.
//!
//! Horizon Lattice uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; applications pick their own:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_lattice_proxy=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Crate-wide target.
    pub const PROXY_CRATE: &str = "horizon_lattice_proxy";
    /// Forwarding accessor target.
    pub const PROXY: &str = "horizon_lattice_proxy::proxy";
    /// Dotted-path resolver target.
    pub const PATH: &str = "horizon_lattice_proxy::path";
    /// Signal emission target.
    pub const SIGNAL: &str = "horizon_lattice_proxy::signal";
    /// Ready-made host target.
    pub const MODEL: &str = "horizon_lattice_proxy::model";
}
