//! # Logging
//!
//! Structured logging through `tracing`, configured from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run                  # requests and document changes
//! RUST_LOG=debug cargo run                 # plus payloads and every read
//! RUST_LOG=social_api=debug,tower_http=debug cargo run
//! ```
//!
//! Collections tag their events with `entity_type` (`User`, `Post`), so the module path
//! is left out of each line.

/// Installs the global subscriber. Call once at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
