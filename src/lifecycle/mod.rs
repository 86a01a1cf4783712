//! Startup and shutdown of the collections, and logging setup.

mod system;
pub mod tracing;

pub use system::*;
pub use tracing::setup_tracing;
