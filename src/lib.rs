//! # Social API
//!
//! > **A social-network REST backend on top of an actor-owned document store.**
//!
//! Users keep a profile, work experiences and friendships; posts carry likes and
//! comments. Everything lives in memory, in collections owned by Tokio tasks.
//!
//! ## 🏗️ Architecture
//!
//! ### 1. The Store ([`doc_store`])
//! A generic `Collection<T>` owns every document of type `T` in its own task and
//! processes requests one at a time. Single-document actions and two-document pair
//! actions are therefore atomic without locks.
//!
//! ### 2. The Core ([`relationship`])
//! The friend-request state machine. [`relationship::apply`] is the only code that
//! writes the `friends`, `requestSend` and `requestPending` sets, and always writes both
//! users of a pair. The user collection runs it as a pair action.
//!
//! ### 3. The Documents ([`user_collection`], [`post_collection`])
//! `Document` implementations for [`User`](model::User) and [`Post`](model::Post): their
//! actions, their error types and, for posts, validation of user references through an
//! injected [`UserClient`](clients::UserClient).
//!
//! ### 4. The Interface ([`clients`], [`api`])
//! Typed clients wrap the generic store client; the axum router turns HTTP requests into
//! client calls and every failure into one JSON error envelope ([`api::ApiError`]).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`SocialSystem`](lifecycle::SocialSystem) spawns the collections, wires the post
//! collection to the user client and awaits every task on shutdown.
//!
//! ## 🚀 Running
//!
//! ```bash
//! RUST_LOG=info APP_PORT=3001 cargo run
//! ```
//!
//! See [`config`] for the environment variables.

pub mod api;
pub mod clients;
pub mod config;
pub mod export;
pub mod lifecycle;
pub mod model;
pub mod post_collection;
pub mod relationship;
pub mod user_collection;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tracing::{error, info};

use api::AppState;
use config::{Config, ConfigError};
use lifecycle::SocialSystem;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Shutdown failed: {0}")]
    Shutdown(String),
}

/// Starts the collections and serves HTTP until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config) -> Result<(), ServerError> {
    info!("Starting collections...");
    let system = SocialSystem::new(config.store_buffer);

    let state = AppState::new(
        system.user_client.clone(),
        system.post_client.clone(),
        config.upload_dir.clone(),
    );
    let app = api::router(state, config.cors_origin.as_deref());

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its client clones are gone once serve returns
    system.shutdown().await.map_err(ServerError::Shutdown)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
