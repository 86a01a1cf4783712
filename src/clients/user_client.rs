//! # User Client
//!
//! High-level API over the user collection: profile CRUD, experiences and the three
//! friend-request operations.

use crate::model::{
    Experience, ExperienceCreate, ExperienceId, ExperienceUpdate, User, UserCreate, UserId,
    UserUpdate,
};
use crate::relationship::{FriendRequest, Outcome};
use crate::user_collection::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use doc_store::{CollectionClient, CollectionHandle, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the user collection.
#[derive(Clone)]
pub struct UserClient {
    inner: CollectionClient<User>,
}

impl UserClient {
    pub fn new(inner: CollectionClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CollectionHandle<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &CollectionClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.into_document_error::<UserError>() {
            Ok(e) => e,
            Err(StoreError::NotFound(id)) => UserError::NotFound(id),
            Err(StoreError::SameDocument(_)) => UserError::SelfRelation,
            Err(other) => UserError::Communication(other.to_string()),
        }
    }
}

impl UserClient {
    #[instrument(skip(self, params))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fetches a user that must exist.
    pub async fn require(&self, id: UserId) -> Result<User, UserError> {
        self.get(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    pub async fn experiences(&self, user: UserId) -> Result<Vec<Experience>, UserError> {
        Ok(self.require(user).await?.experiences)
    }

    pub async fn experience(
        &self,
        user: UserId,
        id: ExperienceId,
    ) -> Result<Experience, UserError> {
        self.require(user)
            .await?
            .experiences
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| UserError::ExperienceNotFound(id.to_string()))
    }

    #[instrument(skip(self, params))]
    pub async fn add_experience(
        &self,
        user: UserId,
        params: ExperienceCreate,
    ) -> Result<Experience, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(user, UserAction::AddExperience(params))
            .await
        {
            Ok(UserActionResult::AddExperience(experience)) => Ok(experience),
            Ok(_) => unreachable!("AddExperience action must return AddExperience result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_experience(
        &self,
        user: UserId,
        id: ExperienceId,
        update: ExperienceUpdate,
    ) -> Result<Experience, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(user, UserAction::UpdateExperience(id, update))
            .await
        {
            Ok(UserActionResult::UpdateExperience(experience)) => Ok(experience),
            Ok(_) => unreachable!("UpdateExperience action must return UpdateExperience result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_experience(&self, user: UserId, id: ExperienceId) -> Result<(), UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(user, UserAction::RemoveExperience(id))
            .await
        {
            Ok(UserActionResult::RemoveExperience(())) => Ok(()),
            Ok(_) => unreachable!("RemoveExperience action must return RemoveExperience result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_image(&self, user: UserId, url: String) -> Result<(), UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(user, UserAction::SetImage(url))
            .await
        {
            Ok(UserActionResult::SetImage(())) => Ok(()),
            Ok(_) => unreachable!("SetImage action must return SetImage result"),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_experience_image(
        &self,
        user: UserId,
        id: ExperienceId,
        url: String,
    ) -> Result<Experience, UserError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(user, UserAction::SetExperienceImage(id, url))
            .await
        {
            Ok(UserActionResult::SetExperienceImage(experience)) => Ok(experience),
            Ok(_) => {
                unreachable!("SetExperienceImage action must return SetExperienceImage result")
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Sends a friend request, or withdraws the one already sent.
    pub async fn send_friend_request(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<Outcome, UserError> {
        self.friend_request(sender, receiver, FriendRequest::Toggle)
            .await
    }

    /// Accepts a pending request between the two users, or ends their friendship.
    pub async fn accept_friend_request(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<Outcome, UserError> {
        self.friend_request(sender, receiver, FriendRequest::AcceptOrToggle)
            .await
    }

    /// Declines the request `receiver` sent to `sender`.
    pub async fn decline_friend_request(
        &self,
        sender: UserId,
        receiver: UserId,
    ) -> Result<Outcome, UserError> {
        self.friend_request(sender, receiver, FriendRequest::Decline)
            .await
    }

    #[instrument(skip(self))]
    async fn friend_request(
        &self,
        sender: UserId,
        receiver: UserId,
        op: FriendRequest,
    ) -> Result<Outcome, UserError> {
        debug!("Sending request");
        let outcome = self
            .inner
            .perform_pair_action(sender, receiver, op)
            .await
            .map_err(Self::map_error)?;
        info!(outcome = outcome.message(), "Friend request handled");
        Ok(outcome)
    }
}
