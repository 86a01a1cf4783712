//! # Collection Client
//!
//! The client half of a collection: a cloneable sender that turns each call into a
//! [`StoreRequest`] and awaits the answer on a oneshot channel.

use crate::document::Document;
use crate::error::StoreError;
use crate::message::{Page, StoreRequest};
use tokio::sync::{mpsc, oneshot};

/// Type-safe async API over a [`Collection`](crate::Collection).
///
/// Holds only a sender, so cloning is cheap and clones can be shared across tasks.
#[derive(Clone)]
pub struct CollectionClient<T: Document> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Document> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::CollectionClosed)?;
        response.await.map_err(|_| StoreError::ResponseDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, page: Page) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::List { page, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn perform_pair_action(
        &self,
        first: T::Id,
        second: T::Id,
        action: T::PairAction,
    ) -> Result<T::PairActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::PairAction {
            first,
            second,
            action,
            respond_to,
        })
        .await
    }
}
