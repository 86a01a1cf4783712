//! # Post Client
//!
//! High-level API over the post collection: posts, likes and comments.

use crate::model::{
    Comment, CommentCreate, CommentId, CommentUpdate, Post, PostCreate, PostId, PostUpdate,
    UserId,
};
use crate::post_collection::{PostAction, PostActionResult, PostError};
use async_trait::async_trait;
use doc_store::{CollectionClient, CollectionHandle, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the post collection.
#[derive(Clone)]
pub struct PostClient {
    inner: CollectionClient<Post>,
}

impl PostClient {
    pub fn new(inner: CollectionClient<Post>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CollectionHandle<Post> for PostClient {
    type Error = PostError;

    fn inner(&self) -> &CollectionClient<Post> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.into_document_error::<PostError>() {
            Ok(e) => e,
            Err(StoreError::NotFound(id)) => PostError::NotFound(id),
            Err(other) => PostError::Communication(other.to_string()),
        }
    }
}

impl PostClient {
    /// Creates a post. Fails with [`PostError::UnknownUser`] if the owner does not exist.
    #[instrument(skip(self, params))]
    pub async fn create_post(&self, params: PostCreate) -> Result<Post, PostError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_post(&self, id: PostId, update: PostUpdate) -> Result<Post, PostError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fetches a post that must exist.
    pub async fn require(&self, id: PostId) -> Result<Post, PostError> {
        self.get(id)
            .await?
            .ok_or_else(|| PostError::NotFound(id.to_string()))
    }

    pub async fn comment(&self, post: PostId, id: CommentId) -> Result<Comment, PostError> {
        self.require(post)
            .await?
            .comments
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| PostError::CommentNotFound(id.to_string()))
    }

    /// Likes the post for `user`, or removes the like. Returns whether it is now liked.
    #[instrument(skip(self))]
    pub async fn toggle_like(&self, post: PostId, user: UserId) -> Result<(bool, usize), PostError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(post, PostAction::ToggleLike(user))
            .await
        {
            Ok(PostActionResult::ToggleLike { liked, likes }) => Ok((liked, likes)),
            Ok(_) => unreachable!("ToggleLike action must return ToggleLike result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self, params))]
    pub async fn add_comment(&self, post: PostId, params: CommentCreate) -> Result<Comment, PostError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(post, PostAction::AddComment(params))
            .await
        {
            Ok(PostActionResult::AddComment(comment)) => Ok(comment),
            Ok(_) => unreachable!("AddComment action must return AddComment result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_comment(
        &self,
        post: PostId,
        id: CommentId,
        update: CommentUpdate,
    ) -> Result<Comment, PostError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(post, PostAction::UpdateComment(id, update))
            .await
        {
            Ok(PostActionResult::UpdateComment(comment)) => Ok(comment),
            Ok(_) => unreachable!("UpdateComment action must return UpdateComment result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_comment(
        &self,
        post: PostId,
        id: CommentId,
        user: UserId,
    ) -> Result<(), PostError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(post, PostAction::RemoveComment { id, user })
            .await
        {
            Ok(PostActionResult::RemoveComment(())) => Ok(()),
            Ok(_) => unreachable!("RemoveComment action must return RemoveComment result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_image(&self, post: PostId, url: String) -> Result<(), PostError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(post, PostAction::SetImage(url))
            .await
        {
            Ok(PostActionResult::SetImage(())) => Ok(()),
            Ok(_) => unreachable!("SetImage action must return SetImage result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
