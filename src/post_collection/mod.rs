//! Post documents with their likes and embedded comments.
//!
//! The collection runs with a [`UserClient`](crate::clients::UserClient) as context, every user a post refers to
//! (owner, liker, comment author) is checked against the user collection first.

mod actions;
pub mod document;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PostClient;
use crate::model::Post;
use doc_store::Collection;

/// Creates the post collection and its client.
///
/// Pass a [`UserClient`](crate::clients::UserClient) to `run()` on the returned collection.
pub fn new(buffer_size: usize) -> (Collection<Post>, PostClient) {
    let (collection, generic_client) = Collection::new(buffer_size);
    let client = PostClient::new(generic_client);

    (collection, client)
}
