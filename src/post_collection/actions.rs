//! Single-document actions on a [`Post`](crate::model::Post).

use crate::model::{Comment, CommentCreate, CommentId, CommentUpdate, UserId};

#[derive(Debug, Clone)]
pub enum PostAction {
    /// Adds the user to the likes, or removes them if already there.
    ToggleLike(UserId),
    AddComment(CommentCreate),
    /// Only the comment's author may edit it.
    UpdateComment(CommentId, CommentUpdate),
    /// Only the comment's author may delete it.
    RemoveComment { id: CommentId, user: UserId },
    SetImage(String),
}

/// Results from PostActions - variants match 1:1 with PostAction
#[derive(Debug, Clone)]
pub enum PostActionResult {
    /// `liked` is the state after the toggle.
    ToggleLike { liked: bool, likes: usize },
    AddComment(Comment),
    UpdateComment(Comment),
    RemoveComment(()),
    SetImage(()),
}
