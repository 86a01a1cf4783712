//! # Mock Collections
//!
//! [`MockClient<T>`] hands out a real [`CollectionClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running [`Collection`](crate::Collection).
//! It is meant for testing the logic *around* a client, such as a document hook that
//! calls another collection, deterministically and with injected failures.
//!
//! | | MockClient | Real collection |
//! |---|---|---|
//! | **State** | none, answers are scripted | real documents |
//! | **Error injection** | `return_err` | needs a specific state |
//! | **Use case** | hooks and client wrappers | the collection itself, full system |
//!
//! ```rust
//! use async_trait::async_trait;
//! use doc_store::mock::MockClient;
//! use doc_store::{Document, StoreError};
//! use std::convert::Infallible;
//! use uuid::Uuid;
//!
//! #[derive(Clone, Debug)] struct Account { id: Uuid }
//! #[derive(Debug, thiserror::Error)] #[error("account error")] struct AccountError;
//!
//! #[async_trait]
//! impl Document for Account {
//!     type Id = Uuid; type Create = (); type Update = (); type Action = ();
//!     type ActionResult = (); type PairAction = Infallible; type PairActionResult = ();
//!     type Context = (); type Error = AccountError;
//!     fn from_create_params(id: Uuid, _: ()) -> Result<Self, AccountError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), AccountError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), AccountError> { Ok(()) }
//!     async fn handle_pair_action(&mut self, _: &mut Self, a: Infallible, _: &()) -> Result<(), AccountError> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let id = Uuid::new_v4();
//!     let mut mock = MockClient::<Account>::new();
//!     mock.expect_get(id).return_err(StoreError::CollectionClosed);
//!
//!     let result = mock.client().get(id).await;
//!     assert!(matches!(result, Err(StoreError::CollectionClosed)));
//!     mock.verify();
//! }
//! ```

use crate::{CollectionClient, Document, StoreError, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted answer to the next request.
enum Expectation<T: Document> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
    PairAction {
        first: T::Id,
        second: T::Id,
        response: Result<T::PairActionResult, StoreError>,
    },
}

/// A mock collection with expectation tracking.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation, or that targets a different id, panics the mock task, which surfaces in
/// the test as a [`StoreError::ResponseDropped`].
pub struct MockClient<T: Document> {
    client: CollectionClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::PairAction {
                            first,
                            second,
                            respond_to,
                            ..
                        },
                        Some(Expectation::PairAction {
                            first: expected_first,
                            second: expected_second,
                            response,
                        }),
                    ) => {
                        assert_eq!(
                            (first, second),
                            (expected_first, expected_second),
                            "pair action called with unexpected ids"
                        );
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    pub fn expect_pair_action(
        &mut self,
        first: T::Id,
        second: T::Id,
    ) -> ExpectationBuilder<T, T::PairActionResult> {
        self.builder(move |response| Expectation::PairAction {
            first,
            second,
            response,
        })
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

impl<T: Document> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Completes an expectation with its scripted response.
pub struct ExpectationBuilder<T: Document, R> {
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: Document, R> ExpectationBuilder<T, R> {
    /// Answers the request successfully.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answers the request with an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.make)(response);
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(expectation);
    }
}
