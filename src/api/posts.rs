//! `/posts` handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use doc_store::CollectionHandle;
use serde::Serialize;
use tracing::info;

use super::error::ApiError;
use super::params::{parse_id, validated, PageQuery};
use super::state::AppState;
use super::uploads::save_image;
use crate::model::{LikeToggle, Post, PostCreate, PostId, PostUpdate};

#[derive(Debug, Serialize)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes: usize,
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let page = PageQuery::from_request(query)?;
    Ok(Json(state.posts.list(page).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<PostCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let params = validated(payload)?;
    let post = state.posts.create_post(params).await?;
    info!(id = %post.id, user = %post.user, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = parse_id(&id)?;
    Ok(Json(state.posts.require(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PostUpdate>, JsonRejection>,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = parse_id(&id)?;
    let update = validated(payload)?;
    Ok(Json(state.posts.update_post(id, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: PostId = parse_id(&id)?;
    state.posts.delete(id).await?;
    info!(%id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Post>, ApiError> {
    let id: PostId = parse_id(&id)?;
    state.posts.require(id).await?;
    let image = save_image(&state.upload_dir, multipart).await?;
    image.attach(|url| state.posts.set_image(id, url)).await?;
    Ok(Json(state.posts.require(id).await?))
}

/// `PUT /posts/:postId/like` with `{"user": ...}`.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LikeToggle>, JsonRejection>,
) -> Result<Json<LikeStatus>, ApiError> {
    let id: PostId = parse_id(&id)?;
    let Json(LikeToggle { user }) = payload?;
    let (liked, likes) = state.posts.toggle_like(id, user).await?;
    Ok(Json(LikeStatus { liked, likes }))
}
