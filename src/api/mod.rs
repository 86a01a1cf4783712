//! HTTP surface: routing, shared state and the error classifier.

pub mod comments;
pub mod error;
pub mod experiences;
pub mod friends;
pub mod params;
pub mod posts;
pub mod state;
pub mod uploads;
pub mod users;

pub use error::ApiError;
pub use state::AppState;

use std::time::Duration;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

/// Builds the application router.
///
/// `cors_origin` restricts cross-origin requests to one origin, `None` allows any.
pub fn router(state: AppState, cors_origin: Option<&str>) -> Router {
    let uploads = ServeDir::new(state.upload_dir.as_path());

    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:user_id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/users/:user_id/image", post(users::upload_image))
        .route("/users/:user_id/pdf", get(users::export_pdf))
        .route(
            "/users/:user_id/experiences",
            get(experiences::list).post(experiences::create),
        )
        .route(
            "/users/:user_id/experiences/csv",
            get(experiences::export_csv),
        )
        .route(
            "/users/:user_id/experiences/:experience_id",
            get(experiences::get)
                .put(experiences::update)
                .delete(experiences::delete),
        )
        .route(
            "/users/:user_id/experiences/:experience_id/image",
            post(experiences::upload_image),
        )
        .route(
            "/users/:user_id/friendRequest/:receiver_id",
            put(friends::toggle_request),
        )
        .route(
            "/users/:user_id/acceptRequest/:receiver_id",
            put(friends::accept_request),
        )
        .route(
            "/users/:user_id/declineRequest/:receiver_id",
            put(friends::decline_request),
        )
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/:post_id",
            get(posts::get).put(posts::update).delete(posts::delete),
        )
        .route("/posts/:post_id/image", post(posts::upload_image))
        .route("/posts/:post_id/like", put(posts::toggle_like))
        .route(
            "/posts/:post_id/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/posts/:post_id/comments/:comment_id",
            get(comments::get)
                .put(comments::update)
                .delete(comments::delete),
        )
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 60));

    match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => cors.allow_origin(origin),
        Some(Err(e)) => {
            warn!("Invalid CORS_ORIGIN, allowing any origin: {e}");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}
