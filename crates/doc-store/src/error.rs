//! # Store Errors
//!
//! Errors raised by the collection machinery itself. Document-specific failures travel
//! boxed inside [`StoreError::Document`] and can be recovered with
//! [`StoreError::document_error`].

/// Errors that can occur within the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection closed")]
    CollectionClosed,
    #[error("Collection dropped response channel")]
    ResponseDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Pair action needs two distinct documents, got {0} twice")]
    SameDocument(String),
    #[error("Document error: {0}")]
    Document(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Returns the document error if this is one of type `E`.
    pub fn document_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            StoreError::Document(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Consumes the error, returning the document error if it is of type `E`.
    pub fn into_document_error<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            StoreError::Document(inner) => match inner.downcast::<E>() {
                Ok(e) => Ok(*e),
                Err(inner) => Err(StoreError::Document(inner)),
            },
            other => Err(other),
        }
    }
}
