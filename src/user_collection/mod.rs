//! User documents: profile CRUD, embedded experiences and friend requests.

mod actions;
pub mod document;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use doc_store::Collection;

/// Creates the user collection and its client.
pub fn new(buffer_size: usize) -> (Collection<User>, UserClient) {
    let (collection, generic_client) = Collection::new(buffer_size);
    let client = UserClient::new(generic_client);

    (collection, client)
}
