use crate::clients::{PostClient, UserClient};
use tracing::{error, info};

/// Owns the running collections of the application.
///
/// Two collections are started:
/// - **Users**: profiles, experiences and friend requests (`Context = ()`)
/// - **Posts**: posts, likes and comments, validating user references through a
///   [`UserClient`] (`Context = UserClient`)
///
/// # Example
///
/// ```rust
/// use social_api::lifecycle::SocialSystem;
/// use social_api::model::UserCreate;
///
/// #[tokio::main]
/// async fn main() {
///     let system = SocialSystem::new(32);
///     let user = system
///         .user_client
///         .create_user(UserCreate {
///             name: "Ada".into(),
///             surname: "Lovelace".into(),
///             email: "ada@example.com".into(),
///             bio: "First programmer".into(),
///             title: "Mathematician".into(),
///             area: "London".into(),
///             image: None,
///         })
///         .await
///         .unwrap();
///     assert!(user.friends.is_empty());
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct SocialSystem {
    pub user_client: UserClient,
    pub post_client: PostClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SocialSystem {
    /// Spawns both collections, each with a request channel of `buffer_size`.
    pub fn new(buffer_size: usize) -> Self {
        let (users, user_client) = crate::user_collection::new(buffer_size);
        let (posts, post_client) = crate::post_collection::new(buffer_size);

        let user_handle = tokio::spawn(users.run(()));
        let post_handle = tokio::spawn(posts.run(user_client.clone()));

        Self {
            user_client,
            post_client,
            handles: vec![user_handle, post_handle],
        }
    }

    /// Drops the clients and waits for every collection task to finish.
    ///
    /// Clones of the clients held elsewhere (router state, spawned tasks) keep their
    /// collection alive, so drop those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down collections...");

        // The post collection holds a UserClient, so it has to stop before users can
        drop(self.post_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection task failed: {:?}", e);
                return Err(format!("Collection task failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
