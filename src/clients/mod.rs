//! Type-safe wrappers around [`CollectionClient`](doc_store::CollectionClient).

pub mod post_client;
pub mod user_client;

pub use post_client::*;
pub use user_client::*;
