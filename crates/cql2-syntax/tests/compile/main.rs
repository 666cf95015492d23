//! Compiler tests
//!
//! Covers configuration, custom factories and sharing one compiler
//! between threads.

mod concurrency;
mod config;
mod factory;

use tracing_subscriber::EnvFilter;

/// Routes compiler logs to the test output; set `RUST_LOG=cql2_syntax=trace`
/// to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
