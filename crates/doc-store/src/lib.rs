//! # Doc Store
//!
//! An in-process document store built on the actor model. Each collection of documents
//! (users, posts, …) is owned by one Tokio task that processes requests sequentially, so
//! every operation on a document is atomic with respect to every other operation on the
//! same collection.
//!
//! ## Store contract
//!
//! | Operation | Request | Notes |
//! |---|---|---|
//! | fetch by id | [`CollectionClient::get`] | `Ok(None)` when absent |
//! | list | [`CollectionClient::list`] | insertion order either way, [`Page`] window |
//! | create | [`CollectionClient::create`] | id minted from a v4 UUID |
//! | field replace | [`CollectionClient::update`] | via [`Document::on_update`] |
//! | delete | [`CollectionClient::delete`] | via [`Document::on_delete`] |
//! | array push / pull | [`CollectionClient::perform_action`] | one document, atomic |
//! | paired change | [`CollectionClient::perform_pair_action`] | two documents, atomic |
//!
//! ## Layers
//!
//! 1. **Document** ([`Document`]) - the aggregate and how it reacts to each request
//! 2. **Collection** ([`Collection`]) - the message loop owning the documents
//! 3. **Client** ([`CollectionClient`], [`CollectionHandle`]) - typed async access
//!
//! ## Context injection
//!
//! Dependencies are handed to [`Collection::run`], not to [`Collection::new`]. A post
//! collection that must check its owner exists is started with a user client as its
//! context after both collections have been created.
//!
//! ## Testing
//!
//! [`mock::MockClient`] scripts the answers of a collection so hooks that call other
//! collections can be tested in isolation.

pub mod client;
pub mod collection;
pub mod document;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;

pub use client::CollectionClient;
pub use collection::Collection;
pub use document::Document;
pub use error::StoreError;
pub use handle::CollectionHandle;
pub use message::{Order, Page, Response, StoreRequest};
