//! Process-wide tracing/logging setup.
//!
//! The engine crates only emit `tracing` events; a host process calls
//! [`init`] once at startup to install the subscriber.

pub mod tracing;

/// Initialize observability for the process.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}
