//! Pure data structures and DTOs for the stored aggregates.
//!
//! [`User`] and [`Post`] are documents; [`Experience`] and [`Comment`] are sub-records
//! embedded in them and never stored on their own.

pub mod comment;
pub mod experience;
pub mod id;
pub mod post;
pub mod user;

pub use comment::*;
pub use experience::*;
pub use id::*;
pub use post::*;
pub use user::*;

/// Placeholder image for users and experiences created without one.
pub const DEFAULT_IMAGE: &str = "https://picsum.photos/300/300";
