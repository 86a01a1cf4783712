//! # Document Trait
//!
//! The `Document` trait is the contract every stored aggregate (User, Post, …) implements
//! to be managed by a [`Collection`](crate::Collection). It names the id, DTO, action and
//! error types of the aggregate and provides the lifecycle hooks the collection calls.
//!
//! # Atomicity
//! A collection processes one message at a time, so everything a hook or action does to
//! `self` is observed by other callers either completely or not at all. Two documents of
//! the same collection can be mutated together through [`Document::handle_pair_action`],
//! which the collection runs inside a single message.
//!
//! # Provided Methods (Hooks)
//! - [`Document::on_create`]
//! - [`Document::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use uuid::Uuid;

/// Trait that any stored aggregate must implement to be managed by a `Collection`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other collections. The `Context` type is
/// injected into every hook at `run()` time, which allows wiring collections that depend
/// on each other after all of them have been created.
#[async_trait]
pub trait Document: Clone + Send + Sync + 'static {
    /// Identifier of the document. New ids are minted from a random v4 UUID.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<Uuid>;

    /// Payload required to create a new document.
    type Create: Send + Sync + Debug;

    /// Payload replacing fields of an existing document.
    type Update: Send + Sync + Debug;

    /// Single-document operations (push/pull of embedded arrays and similar).
    type Action: Send + Sync + Debug;

    /// Result returned by [`Document::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Operations that must change two documents of this collection together.
    /// Use [`std::convert::Infallible`] when the document has none.
    type PairAction: Send + Sync + Debug;

    /// Result returned by [`Document::handle_pair_action`].
    type PairActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into the collection. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Per-document error type. One enum covers every operation of the document.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the document from its freshly minted id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the document is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a field update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handlers (Async) ---

    /// Handles a single-document action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Handles an action over two distinct documents of this collection.
    ///
    /// `self` is the first id given to the request, `other` the second. Both are written
    /// back to the collection after the handler returns, whether it succeeded or not, so
    /// a handler that fails must leave them untouched.
    async fn handle_pair_action(
        &mut self,
        other: &mut Self,
        action: Self::PairAction,
        _ctx: &Self::Context,
    ) -> Result<Self::PairActionResult, Self::Error>;
}
