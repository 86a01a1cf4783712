//! # CollectionHandle Trait
//!
//! Common interface for document-specific clients: default `get`, `list` and `delete`
//! built on top of the wrapped [`CollectionClient`], with store errors mapped into the
//! document's own error type.
use crate::{CollectionClient, Document, Page, StoreError};
use async_trait::async_trait;

/// Trait for document-specific clients to inherit the read/delete operations.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use doc_store::{CollectionClient, CollectionHandle, Document, StoreError};
/// use std::convert::Infallible;
/// use uuid::Uuid;
///
/// #[derive(Clone, Debug)] struct Tag { id: Uuid }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
///
/// #[async_trait]
/// impl Document for Tag {
///     type Id = Uuid; type Create = (); type Update = (); type Action = ();
///     type ActionResult = (); type PairAction = Infallible; type PairActionResult = ();
///     type Context = (); type Error = TagError;
///     fn from_create_params(id: Uuid, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_pair_action(&mut self, _: &mut Self, a: Infallible, _: &()) -> Result<(), TagError> { match a {} }
/// }
///
/// struct TagClient { inner: CollectionClient<Tag> }
///
/// #[async_trait]
/// impl CollectionHandle<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &CollectionClient<Tag> { &self.inner }
///     fn map_error(e: StoreError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient, id: Uuid) {
///     let _ = client.get(id).await;
///     let _ = client.delete(id).await;
/// }
/// ```
#[async_trait]
pub trait CollectionHandle<T: Document>: Send + Sync {
    /// The document-specific error type.
    type Error: Send + Sync;

    /// Access the wrapped generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the document error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a document by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch a page of documents in insertion order.
    #[tracing::instrument(skip(self))]
    async fn list(&self, page: Page) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(page).await.map_err(Self::map_error)
    }

    /// Delete a document by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
