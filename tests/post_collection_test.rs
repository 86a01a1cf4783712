use doc_store::mock::MockClient;
use doc_store::{CollectionHandle, StoreError};
use social_api::clients::UserClient;
use social_api::model::{
    CommentCreate, CommentUpdate, PostCreate, PostUpdate, User, UserCreate, UserId,
};
use social_api::post_collection::PostError;

fn user(id: UserId) -> User {
    User::new(
        id,
        UserCreate {
            name: "Grace".into(),
            surname: "Hopper".into(),
            email: "grace@example.com".into(),
            bio: "bio".into(),
            title: "Admiral".into(),
            area: "Arlington".into(),
            image: None,
        },
    )
}

/// Real post collection with a mocked user collection as context.
/// Every user reference the post collection checks shows up as one `get`.
#[tokio::test]
async fn post_collection_with_mocked_users() {
    let author = UserId::new();
    let commenter = UserId::new();

    let mut users = MockClient::<User>::new();
    users.expect_get(author).return_ok(Some(user(author)));
    users.expect_get(commenter).return_ok(Some(user(commenter)));

    let (posts, post_client) = social_api::post_collection::new(10);
    let handle = tokio::spawn(posts.run(UserClient::new(users.client())));

    let post = post_client
        .create_post(PostCreate {
            text: "First post".into(),
            user: author,
            image: None,
        })
        .await
        .expect("Post creation failed");
    assert_eq!(post.user, author);

    let comment = post_client
        .add_comment(
            post.id,
            CommentCreate {
                text: "Nice".into(),
                user: commenter,
            },
        )
        .await
        .unwrap();

    // Editing is checked against the stored author, no user lookup needed
    let denied = post_client
        .update_comment(
            post.id,
            comment.id,
            CommentUpdate {
                text: "Hijacked".into(),
                user: author,
            },
        )
        .await;
    assert_eq!(denied.unwrap_err(), PostError::NotCommentAuthor);

    let edited = post_client
        .update_comment(
            post.id,
            comment.id,
            CommentUpdate {
                text: "Very nice".into(),
                user: commenter,
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.text, "Very nice");

    let denied = post_client.remove_comment(post.id, comment.id, author).await;
    assert_eq!(denied.unwrap_err(), PostError::NotCommentAuthor);
    post_client
        .remove_comment(post.id, comment.id, commenter)
        .await
        .unwrap();

    let stored = post_client.require(post.id).await.unwrap();
    assert!(stored.comments.is_empty());

    users.verify();

    drop(post_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn unknown_owner_rejects_post() {
    let ghost = UserId::new();
    let mut users = MockClient::<User>::new();
    users.expect_get(ghost).return_ok(None);

    let (posts, post_client) = social_api::post_collection::new(10);
    let handle = tokio::spawn(posts.run(UserClient::new(users.client())));

    let result = post_client
        .create_post(PostCreate {
            text: "Nobody wrote this".into(),
            user: ghost,
            image: None,
        })
        .await;

    assert_eq!(result.unwrap_err(), PostError::UnknownUser(ghost.to_string()));
    assert!(post_client.list(Default::default()).await.unwrap().is_empty());
    users.verify();

    drop(post_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn user_store_failure_is_a_communication_error() {
    let author = UserId::new();
    let mut users = MockClient::<User>::new();
    users.expect_get(author).return_err(StoreError::CollectionClosed);

    let (posts, post_client) = social_api::post_collection::new(10);
    let handle = tokio::spawn(posts.run(UserClient::new(users.client())));

    let result = post_client
        .create_post(PostCreate {
            text: "Hello".into(),
            user: author,
            image: None,
        })
        .await;

    assert!(matches!(result, Err(PostError::Communication(_))));

    drop(post_client);
    handle.await.unwrap();
}

#[tokio::test]
async fn missing_post_and_comment_are_not_found() {
    let author = UserId::new();
    let mut users = MockClient::<User>::new();
    users.expect_get(author).return_ok(Some(user(author)));

    let (posts, post_client) = social_api::post_collection::new(10);
    let handle = tokio::spawn(posts.run(UserClient::new(users.client())));

    let post = post_client
        .create_post(PostCreate {
            text: "Hello".into(),
            user: author,
            image: None,
        })
        .await
        .unwrap();

    let missing_post = social_api::model::PostId::new();
    let result = post_client
        .update_post(missing_post, PostUpdate::default())
        .await;
    assert_eq!(result.unwrap_err(), PostError::NotFound(missing_post.to_string()));

    let missing_comment = social_api::model::CommentId::new();
    let result = post_client
        .remove_comment(post.id, missing_comment, author)
        .await;
    assert_eq!(
        result.unwrap_err(),
        PostError::CommentNotFound(missing_comment.to_string())
    );

    drop(post_client);
    handle.await.unwrap();
}
