//! Document trait implementation for [`Post`].
//!
//! User references are validated through the [`UserClient`] context before anything is
//! written, so a failed check leaves the post unchanged.

use super::actions::{PostAction, PostActionResult};
use super::error::PostError;
use crate::clients::UserClient;
use crate::model::{Comment, CommentId, Post, PostCreate, PostId, PostUpdate, UserId};
use async_trait::async_trait;
use chrono::Utc;
use doc_store::{CollectionHandle, Document};
use std::convert::Infallible;
use tracing::{debug, warn};

#[async_trait]
impl Document for Post {
    type Id = PostId;
    type Create = PostCreate;
    type Update = PostUpdate;
    type Action = PostAction;
    type ActionResult = PostActionResult;
    type PairAction = Infallible;
    type PairActionResult = ();
    type Context = UserClient;
    type Error = PostError;

    fn from_create_params(id: PostId, params: PostCreate) -> Result<Self, PostError> {
        Ok(Post::new(id, params))
    }

    /// Rejects posts whose owner does not exist.
    async fn on_create(&mut self, users: &UserClient) -> Result<(), PostError> {
        require_user(users, self.user).await
    }

    async fn on_update(&mut self, update: PostUpdate, _users: &UserClient) -> Result<(), PostError> {
        self.apply(update);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PostAction,
        users: &UserClient,
    ) -> Result<PostActionResult, PostError> {
        match action {
            PostAction::ToggleLike(user) => {
                require_user(users, user).await?;
                let liked = if self.likes.remove(&user) {
                    false
                } else {
                    self.likes.insert(user);
                    true
                };
                self.touch();
                Ok(PostActionResult::ToggleLike {
                    liked,
                    likes: self.likes.len(),
                })
            }
            PostAction::AddComment(params) => {
                require_user(users, params.user).await?;
                let comment = Comment::new(CommentId::new(), params);
                self.comments.push(comment.clone());
                self.touch();
                Ok(PostActionResult::AddComment(comment))
            }
            PostAction::UpdateComment(id, update) => {
                let comment = self.authored_comment_mut(id, update.user)?;
                comment.text = update.text;
                comment.updated_at = Utc::now();
                let comment = comment.clone();
                self.touch();
                Ok(PostActionResult::UpdateComment(comment))
            }
            PostAction::RemoveComment { id, user } => {
                self.authored_comment_mut(id, user)?;
                self.comments.retain(|c| c.id != id);
                self.touch();
                Ok(PostActionResult::RemoveComment(()))
            }
            PostAction::SetImage(url) => {
                self.image = Some(url);
                self.touch();
                Ok(PostActionResult::SetImage(()))
            }
        }
    }

    async fn handle_pair_action(
        &mut self,
        _other: &mut Post,
        action: Infallible,
        _users: &UserClient,
    ) -> Result<(), PostError> {
        match action {}
    }
}

impl Post {
    fn authored_comment_mut(
        &mut self,
        id: CommentId,
        user: UserId,
    ) -> Result<&mut Comment, PostError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PostError::CommentNotFound(id.to_string()))?;
        if comment.user != user {
            warn!(comment = %id, %user, "Comment change by non-author");
            return Err(PostError::NotCommentAuthor);
        }
        Ok(comment)
    }
}

async fn require_user(users: &UserClient, id: UserId) -> Result<(), PostError> {
    debug!(%id, "Checking user exists");
    match users.get(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(PostError::UnknownUser(id.to_string())),
        Err(e) => Err(PostError::Communication(e.to_string())),
    }
}
