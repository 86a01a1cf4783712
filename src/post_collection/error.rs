//! Error types for the post collection.

use thiserror::Error;

/// Errors that can occur during post operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    /// A user referenced by the request does not exist.
    #[error("User not found: {0}")]
    UnknownUser(String),

    /// Someone other than the author tried to change a comment.
    #[error("Only the author can modify this comment")]
    NotCommentAuthor,

    #[error("{0}")]
    Validation(String),

    /// An error occurred while communicating with a collection.
    #[error("Store communication error: {0}")]
    Communication(String),
}

impl From<String> for PostError {
    fn from(msg: String) -> Self {
        PostError::Communication(msg)
    }
}
