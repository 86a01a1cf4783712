use std::path::PathBuf;
use std::sync::Arc;

use crate::clients::{PostClient, UserClient};

/// Shared by every handler. Cloning copies two channel senders and a pointer.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub posts: PostClient,
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(users: UserClient, posts: PostClient, upload_dir: PathBuf) -> Self {
        Self {
            users,
            posts,
            upload_dir: Arc::new(upload_dir),
        }
    }
}
