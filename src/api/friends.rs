//! Friend-request endpoints. Each answers with the plain-text outcome message.

use axum::extract::{Path, State};

use super::error::ApiError;
use super::params::parse_id;
use super::state::AppState;
use crate::model::UserId;
use crate::user_collection::UserError;

fn pair(sender: &str, receiver: &str) -> Result<(UserId, UserId), ApiError> {
    let (sender, receiver): (UserId, UserId) = (parse_id(sender)?, parse_id(receiver)?);
    if sender == receiver {
        return Err(UserError::SelfRelation.into());
    }
    Ok((sender, receiver))
}

/// `PUT /users/:senderId/friendRequest/:receiverId`
pub async fn toggle_request(
    State(state): State<AppState>,
    Path((sender, receiver)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (sender, receiver) = pair(&sender, &receiver)?;
    let outcome = state.users.send_friend_request(sender, receiver).await?;
    Ok(outcome.message())
}

/// `PUT /users/:senderId/acceptRequest/:receiverId`
pub async fn accept_request(
    State(state): State<AppState>,
    Path((sender, receiver)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (sender, receiver) = pair(&sender, &receiver)?;
    let outcome = state.users.accept_friend_request(sender, receiver).await?;
    Ok(outcome.message())
}

/// `PUT /users/:senderId/declineRequest/:receiverId`
pub async fn decline_request(
    State(state): State<AppState>,
    Path((sender, receiver)): Path<(String, String)>,
) -> Result<&'static str, ApiError> {
    let (sender, receiver) = pair(&sender, &receiver)?;
    let outcome = state.users.decline_friend_request(sender, receiver).await?;
    Ok(outcome.message())
}
