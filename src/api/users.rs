//! `/users` handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use doc_store::CollectionHandle;
use tracing::info;

use super::error::ApiError;
use super::params::{parse_id, validated, PageQuery};
use super::state::AppState;
use super::uploads::save_image;
use crate::export::user_pdf;
use crate::model::{User, UserCreate, UserId, UserUpdate};

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<User>>, ApiError> {
    let page = PageQuery::from_request(query)?;
    Ok(Json(state.users.list(page).await?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<UserCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let params = validated(payload)?;
    let user = state.users.create_user(params).await?;
    info!(id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = parse_id(&id)?;
    Ok(Json(state.users.require(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let update = validated(payload)?;
    Ok(Json(state.users.update_user(id, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: UserId = parse_id(&id)?;
    state.users.delete(id).await?;
    info!(%id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<User>, ApiError> {
    let id: UserId = parse_id(&id)?;
    // Fail before writing the file if the user is missing
    state.users.require(id).await?;
    let image = save_image(&state.upload_dir, multipart).await?;
    image.attach(|url| state.users.set_image(id, url)).await?;
    Ok(Json(state.users.require(id).await?))
}

/// Downloads the profile as `profile.pdf`.
pub async fn export_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.require(id).await?;
    let body = user_pdf(&user)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=profile.pdf"),
        ],
        body,
    ))
}
