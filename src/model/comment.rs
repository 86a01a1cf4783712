use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::{CommentId, UserId};

/// A comment on a [`Post`](crate::model::Post). Owned by exactly one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub user: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for adding a comment, `user` is the author.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentCreate {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    pub user: UserId,
}

/// Payload for editing a comment. `user` must be the comment's author.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentUpdate {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
    pub user: UserId,
}

/// Identifies who is deleting a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentAuthor {
    pub user: UserId,
}

impl Comment {
    pub fn new(id: CommentId, params: CommentCreate) -> Self {
        let now = Utc::now();
        Self {
            id,
            text: params.text,
            user: params.user,
            created_at: now,
            updated_at: now,
        }
    }
}
