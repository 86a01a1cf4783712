//! # Collection Actor
//!
//! The `Collection` owns every document of one type and processes all requests for them
//! sequentially in its own Tokio task. Exclusive ownership of the map is what makes
//! single-document actions and pair actions atomic: no other request can observe a
//! document between the two halves of a change.

use crate::client::CollectionClient;
use crate::document::Document;
use crate::error::StoreError;
use crate::message::{Order, Page, StoreRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The server half of a collection.
///
/// # Usage Pattern
///
/// 1. **Create**: `Collection::new()` returns the collection and its client.
/// 2. **Wire**: pass dependencies (other clients) into `run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use async_trait::async_trait;
/// use doc_store::{Collection, Document};
/// use std::convert::Infallible;
/// use uuid::Uuid;
///
/// #[derive(Clone, Debug)]
/// struct Note { id: Uuid, text: String }
/// #[derive(Debug, thiserror::Error)]
/// #[error("note error")]
/// struct NoteError;
///
/// #[async_trait]
/// impl Document for Note {
///     type Id = Uuid;
///     type Create = String;
///     type Update = String;
///     type Action = ();
///     type ActionResult = ();
///     type PairAction = Infallible;
///     type PairActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: Uuid, text: String) -> Result<Self, NoteError> {
///         Ok(Self { id, text })
///     }
///     async fn on_update(&mut self, text: String, _: &()) -> Result<(), NoteError> {
///         self.text = text;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
///     async fn handle_pair_action(&mut self, _: &mut Self, action: Infallible, _: &()) -> Result<(), NoteError> {
///         match action {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (collection, client) = Collection::<Note>::new(10);
///     tokio::spawn(collection.run(()));
///     let note = client.create("hello".into()).await.unwrap();
///     assert_eq!(client.get(note.id).await.unwrap().unwrap().text, "hello");
/// }
/// ```
///
/// # Operations
///
/// * **Create**: mints a v4 UUID, builds the document, runs `on_create`, stores it.
/// * **Get**: clones the stored document, if any.
/// * **List**: clones a page of documents in insertion order.
/// * **Update**: runs `on_update` on the stored document and returns the new state.
/// * **Delete**: runs `on_delete`, then removes the document.
/// * **Action**: runs `handle_action` on the stored document.
/// * **PairAction**: takes both documents out of the map, runs `handle_pair_action`,
///   puts both back.
pub struct Collection<T: Document> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: Document> Collection<T> {
    /// Creates a collection and its client.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let collection = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
        };
        (collection, CollectionClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// The `context` is handed to every document hook.
    pub async fn run(mut self, context: T::Context) {
        // Short type name, "User" rather than "social_api::model::user::User"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(Uuid::new_v4());

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut doc) => {
                            if let Err(e) = doc.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ = respond_to.send(Err(StoreError::Document(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), doc.clone());
                            self.order.push(id.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(doc));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::Document(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let doc = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = doc.is_some(), "Get");
                    let _ = respond_to.send(Ok(doc));
                }
                StoreRequest::List { page, respond_to } => {
                    let docs = self.page(page);
                    debug!(entity_type, offset = page.offset, limit = page.limit, order = ?page.order, count = docs.len(), "List");
                    let _ = respond_to.send(Ok(docs));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(doc) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = doc.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::Document(Box::new(e))));
                        continue;
                    }
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(doc.clone()));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(doc) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = doc.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::Document(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    self.order.retain(|existing| existing != &id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(doc) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = doc
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| StoreError::Document(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::PairAction {
                    first,
                    second,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %first, %second, ?action, "Pair action");
                    let result = self.pair_action(&first, &second, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %first, %second, "Pair action ok"),
                        Err(e) => warn!(entity_type, %first, %second, error = %e, "Pair action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn page(&self, page: Page) -> Vec<T> {
        let ids: Box<dyn Iterator<Item = &T::Id> + '_> = match page.order {
            Order::Oldest => Box::new(self.order.iter()),
            Order::Newest => Box::new(self.order.iter().rev()),
        };
        ids.skip(page.offset)
            .take(page.limit)
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }

    async fn pair_action(
        &mut self,
        first: &T::Id,
        second: &T::Id,
        action: T::PairAction,
        context: &T::Context,
    ) -> Result<T::PairActionResult, StoreError> {
        if first == second {
            return Err(StoreError::SameDocument(first.to_string()));
        }
        if !self.store.contains_key(second) {
            return Err(StoreError::NotFound(second.to_string()));
        }
        let Some(mut a) = self.store.remove(first) else {
            return Err(StoreError::NotFound(first.to_string()));
        };
        let Some(mut b) = self.store.remove(second) else {
            self.store.insert(first.clone(), a);
            return Err(StoreError::NotFound(second.to_string()));
        };

        let result = a
            .handle_pair_action(&mut b, action, context)
            .await
            .map_err(|e| StoreError::Document(Box::new(e)));

        self.store.insert(first.clone(), a);
        self.store.insert(second.clone(), b);
        result
    }
}
