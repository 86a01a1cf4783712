//! Error types for the user collection.

use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The experience does not belong to the user.
    #[error("Experience not found: {0}")]
    ExperienceNotFound(String),

    /// The user data provided is invalid.
    #[error("{0}")]
    Validation(String),

    /// A friend request addressed to oneself.
    #[error("You cannot send a friend request to yourself")]
    SelfRelation,

    /// An error occurred while communicating with the collection.
    #[error("Store communication error: {0}")]
    Communication(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::Communication(msg)
    }
}
