//! The single mapping from failures to HTTP responses.
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `Validation` | 400 | `{success, message, errorsList}` |
//! | `InvalidId` | 400 | `{success, message: "Please enter a correct ID"}` |
//! | `Unauthorized` | 401 | `{success, message}` |
//! | `NotFound` | 404 | `{success, message}` |
//! | `Internal` | 500 | `{success, message}` with a fixed message, detail logged |

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::export::ExportError;
use crate::post_collection::PostError;
use crate::user_collection::UserError;

pub const INVALID_ID_MESSAGE: &str = "Please enter a correct ID";
pub const INTERNAL_MESSAGE: &str = "Check the backend console to see what's going on";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },

    /// A path segment that is not a valid identifier.
    #[error("Please enter a correct ID")]
    InvalidId(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError::Validation {
            errors: vec![message.clone()],
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": message, "errorsList": errors }),
            ),
            ApiError::InvalidId(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": INVALID_ID_MESSAGE }),
            ),
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "message": message }),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": message }),
            ),
            ApiError::Internal(detail) => {
                error!(%detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": INTERNAL_MESSAGE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        let mut fields: Vec<_> = e.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let errors = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();

        ApiError::Validation {
            message: "Validation failed".into(),
            errors,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::validation(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::validation(e.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::validation(e.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) | UserError::ExperienceNotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            UserError::Validation(_) | UserError::SelfRelation => {
                ApiError::validation(e.to_string())
            }
            UserError::Communication(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(e: PostError) -> Self {
        match e {
            PostError::NotFound(_) | PostError::CommentNotFound(_) | PostError::UnknownUser(_) => {
                ApiError::NotFound(e.to_string())
            }
            PostError::NotCommentAuthor => ApiError::Unauthorized(e.to_string()),
            PostError::Validation(_) => ApiError::validation(e.to_string()),
            PostError::Communication(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_lists_errors() {
        let (status, body) = render(ApiError::validation("Text is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Text is required");
        assert_eq!(body["errorsList"], json!(["Text is required"]));
    }

    #[tokio::test]
    async fn invalid_id_has_fixed_message() {
        let (status, body) = render(ApiError::InvalidId("abc".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], INVALID_ID_MESSAGE);
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let (status, body) = render(ApiError::Internal("channel closed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "message": INTERNAL_MESSAGE }));
    }

    #[tokio::test]
    async fn domain_errors_map_to_status() {
        let cases = [
            (ApiError::from(UserError::NotFound("x".into())), StatusCode::NOT_FOUND),
            (ApiError::from(UserError::SelfRelation), StatusCode::BAD_REQUEST),
            (ApiError::from(PostError::NotCommentAuthor), StatusCode::UNAUTHORIZED),
            (ApiError::from(PostError::UnknownUser("x".into())), StatusCode::NOT_FOUND),
            (
                ApiError::from(PostError::Communication("closed".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
