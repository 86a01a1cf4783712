//! `/posts/:postId/comments` handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::error::ApiError;
use super::params::{parse_id, validated};
use super::state::AppState;
use crate::model::{Comment, CommentAuthor, CommentCreate, CommentId, CommentUpdate, PostId};

fn ids(post: &str, comment: &str) -> Result<(PostId, CommentId), ApiError> {
    Ok((parse_id(post)?, parse_id(comment)?))
}

pub async fn list(
    State(state): State<AppState>,
    Path(post): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let post: PostId = parse_id(&post)?;
    Ok(Json(state.posts.require(post).await?.comments))
}

pub async fn create(
    State(state): State<AppState>,
    Path(post): Path<String>,
    payload: Result<Json<CommentCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let post: PostId = parse_id(&post)?;
    let params = validated(payload)?;
    let comment = state.posts.add_comment(post, params).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get(
    State(state): State<AppState>,
    Path((post, comment)): Path<(String, String)>,
) -> Result<Json<Comment>, ApiError> {
    let (post, comment) = ids(&post, &comment)?;
    Ok(Json(state.posts.comment(post, comment).await?))
}

/// Only the comment's author, given as `user` in the body, may edit it.
pub async fn update(
    State(state): State<AppState>,
    Path((post, comment)): Path<(String, String)>,
    payload: Result<Json<CommentUpdate>, JsonRejection>,
) -> Result<Json<Comment>, ApiError> {
    let (post, comment) = ids(&post, &comment)?;
    let update = validated(payload)?;
    Ok(Json(state.posts.update_comment(post, comment, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((post, comment)): Path<(String, String)>,
    payload: Result<Json<CommentAuthor>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let (post, comment) = ids(&post, &comment)?;
    let Json(CommentAuthor { user }) = payload?;
    state.posts.remove_comment(post, comment, user).await?;
    Ok(StatusCode::NO_CONTENT)
}
