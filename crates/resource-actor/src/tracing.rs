//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber used by every binary built
//! on this crate.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: start (with seed size and id policy), reset, shutdown
//! - **Entity operations**: List, Create, Get, Update, Delete with `entity_type` and `id`
//! - **Errors**: misses and failed hooks as `warn!`
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run      # payloads of every request
//! RUST_LOG=resource_actor=debug cargo run
//! ```
//!
//! When `RUST_LOG` is unset the `default_directive` is used instead.

use tracing_subscriber::EnvFilter;

/// Initializes the compact, target-less formatter with an env-driven filter.
///
/// Calling it twice is harmless: the second installation attempt is ignored.
pub fn setup_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type already says where a line comes from
        .compact()
        .try_init();
}
