//! Process-wide tracing setup.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once at
//! startup to decide where they go.

/// Tracing subscriber configuration (filters, formatting).
pub mod tracing;

/// Initialize tracing with the default `info` filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Initialize tracing, falling back to `default_filter` when `RUST_LOG` is unset.
pub fn init_with_default(default_filter: &str) {
    tracing::init(default_filter);
}
