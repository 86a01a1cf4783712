//! `/users/:userId/experiences` handlers.

use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::error::ApiError;
use super::params::{parse_id, validated};
use super::state::AppState;
use super::uploads::save_image;
use crate::export::experiences_csv;
use crate::model::{Experience, ExperienceCreate, ExperienceId, ExperienceUpdate, UserId};

fn ids(user: &str, experience: &str) -> Result<(UserId, ExperienceId), ApiError> {
    Ok((parse_id(user)?, parse_id(experience)?))
}

pub async fn list(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Vec<Experience>>, ApiError> {
    let user: UserId = parse_id(&user)?;
    Ok(Json(state.users.experiences(user).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Path(user): Path<String>,
    payload: Result<Json<ExperienceCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Experience>), ApiError> {
    let user: UserId = parse_id(&user)?;
    let params = validated(payload)?;
    let experience = state.users.add_experience(user, params).await?;
    Ok((StatusCode::CREATED, Json(experience)))
}

pub async fn get(
    State(state): State<AppState>,
    Path((user, experience)): Path<(String, String)>,
) -> Result<Json<Experience>, ApiError> {
    let (user, experience) = ids(&user, &experience)?;
    Ok(Json(state.users.experience(user, experience).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path((user, experience)): Path<(String, String)>,
    payload: Result<Json<ExperienceUpdate>, JsonRejection>,
) -> Result<Json<Experience>, ApiError> {
    let (user, experience) = ids(&user, &experience)?;
    let update = validated(payload)?;
    Ok(Json(
        state.users.update_experience(user, experience, update).await?,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((user, experience)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let (user, experience) = ids(&user, &experience)?;
    state.users.remove_experience(user, experience).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_image(
    State(state): State<AppState>,
    Path((user, experience)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Json<Experience>, ApiError> {
    let (user, experience) = ids(&user, &experience)?;
    state.users.experience(user, experience).await?;
    let image = save_image(&state.upload_dir, multipart).await?;
    let experience = image
        .attach(|url| state.users.set_experience_image(user, experience, url))
        .await?;
    Ok(Json(experience))
}

/// Downloads the user's experiences as `experiences.csv`.
pub async fn export_csv(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user: UserId = parse_id(&user)?;
    let experiences = state.users.experiences(user).await?;
    let body = experiences_csv(&experiences)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=experiences.csv",
            ),
        ],
        body,
    ))
}
