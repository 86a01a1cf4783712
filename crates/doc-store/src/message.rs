//! # Collection Messages
//!
//! Message types exchanged between a [`CollectionClient`](crate::CollectionClient) and
//! its [`Collection`](crate::Collection).

use crate::document::Document;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot channel the collection answers on.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Direction a [`Page`] walks the insertion order in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Oldest,
    Newest,
}

/// Window over a collection in insertion order, oldest first unless `order` says
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
    pub order: Order,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 50;

    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            order: Order::Oldest,
        }
    }

    pub fn with_order(self, order: Order) -> Self {
        Self { order, ..self }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Request sent to a collection.
///
/// CRUD variants map onto the store contract: `Get` is fetch-by-id, `Update` replaces
/// fields, `Action` runs an atomic single-document change (array push/pull) and
/// `PairAction` runs one atomic change over two documents.
#[derive(Debug)]
pub enum StoreRequest<T: Document> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        page: Page,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    PairAction {
        first: T::Id,
        second: T::Id,
        action: T::PairAction,
        respond_to: Response<T::PairActionResult>,
    },
}
