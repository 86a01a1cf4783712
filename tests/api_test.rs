use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use social_api::api::{self, AppState};
use social_api::lifecycle::SocialSystem;
use tower::ServiceExt;

fn app(system: &SocialSystem) -> Router {
    let state = AppState::new(
        system.user_client.clone(),
        system.post_client.clone(),
        std::env::temp_dir().join(format!("social-api-{}", uuid::Uuid::new_v4())),
    );
    api::router(state, None)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Posts a multipart form with a single file part.
async fn upload(
    app: &Router,
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> (StatusCode, Value) {
    let boundary = "social-api-test-boundary";
    let mut body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really pixels";

async fn create_user(app: &Router, name: &str) -> String {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/users",
        Some(json!({
            "name": name,
            "surname": "Doe",
            "email": format!("{}@example.com", name.to_lowercase()),
            "bio": "Hi",
            "title": "Engineer",
            "area": "Berlin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn friend_endpoints_answer_with_text() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let u1 = create_user(&app, "U1").await;
    let u2 = create_user(&app, "U2").await;

    let (status, body) = send(&app, Method::PUT, &format!("/users/{u1}/friendRequest/{u2}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Friend Request sent");

    let (_, user) = send_json(&app, Method::GET, &format!("/users/{u1}"), None).await;
    assert_eq!(user["requestSend"], json!([u2]));
    let (_, user) = send_json(&app, Method::GET, &format!("/users/{u2}"), None).await;
    assert_eq!(user["requestPending"], json!([u1]));

    let (_, body) = send(&app, Method::PUT, &format!("/users/{u2}/acceptRequest/{u1}"), None).await;
    assert_eq!(body, b"Request accepted");

    let (_, user) = send_json(&app, Method::GET, &format!("/users/{u1}"), None).await;
    assert_eq!(user["friends"], json!([u2]));
    assert_eq!(user["requestSend"], json!([]));

    let (_, body) = send(&app, Method::PUT, &format!("/users/{u1}/declineRequest/{u2}"), None).await;
    assert_eq!(body, b"No request to decline");

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let system = SocialSystem::new(32);
    let app = app(&system);

    let (status, body) = send_json(&app, Method::GET, "/users/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter a correct ID");

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn missing_documents_are_not_found() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let ghost = uuid::Uuid::new_v4();
    let u1 = create_user(&app, "U1").await;

    let (status, body) = send_json(&app, Method::GET, &format!("/users/{ghost}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::PUT, &format!("/users/{u1}/friendRequest/{ghost}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/posts/{ghost}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_body_lists_errors() {
    let system = SocialSystem::new(32);
    let app = app(&system);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/users",
        Some(json!({
            "name": "",
            "surname": "Doe",
            "email": "not-an-email",
            "bio": "Hi",
            "title": "Engineer",
            "area": "Berlin"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let errors = body["errorsList"].as_array().unwrap();
    assert!(errors.contains(&json!("Name is required")));
    assert!(errors.contains(&json!("A valid email is required")));

    let (status, body) = send_json(&app, Method::POST, "/users", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn experiences_export_as_csv() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Ada").await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        &format!("/users/{user}/experiences"),
        Some(json!({
            "role": "Developer",
            "company": "Acme",
            "startDate": "2020-01-01",
            "description": "Backend",
            "area": "Remote"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let request = Request::builder()
        .uri(format!("/users/{user}/experiences/csv"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=experiences.csv"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("role,company,startDate,endDate,description,area,image\n"));
    assert!(csv.contains("Developer,Acme,2020-01-01,,Backend,Remote,"));

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn only_author_may_edit_comment() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let author = create_user(&app, "Author").await;
    let other = create_user(&app, "Other").await;

    let (status, post) = send_json(
        &app,
        Method::POST,
        "/posts",
        Some(json!({ "text": "Hello", "user": author })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let post = post["id"].as_str().unwrap().to_string();

    let (status, comment) = send_json(
        &app,
        Method::POST,
        &format!("/posts/{post}/comments"),
        Some(json!({ "text": "First", "user": author })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let comment = comment["id"].as_str().unwrap().to_string();

    let uri = format!("/posts/{post}/comments/{comment}");
    let (status, body) = send_json(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "text": "Edited", "user": other })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(json!({ "user": author }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, Method::PUT, &format!("/posts/{post}/like"), Some(json!({ "user": other }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "liked": true, "likes": 1 }));

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn user_image_is_stored_and_served() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Ada").await;

    let (status, body) = upload(
        &app,
        &format!("/users/{user}/image"),
        "image",
        "avatar.PNG",
        "image/png",
        PNG,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let url = body["image"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/") && url.ends_with(".png"), "{url}");

    let request = Request::builder().uri(&url).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let served = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&served[..], PNG);

    let (_, stored) = send_json(&app, Method::GET, &format!("/users/{user}"), None).await;
    assert_eq!(stored["image"], url.as_str());

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn html_upload_is_rejected() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Mallory").await;
    let uri = format!("/users/{user}/image");
    let script = b"<script>alert(document.cookie)</script>";

    let (status, body) = upload(&app, &uri, "image", "x.html", "text/html", script).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsList"], json!([api::uploads::UNSUPPORTED_IMAGE]));

    let (status, _) = upload(&app, &uri, "image", "x.html", "image/png", script).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app, &uri, "image", "x.svg", "image/svg+xml", script).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send_json(&app, Method::GET, &format!("/users/{user}"), None).await;
    assert!(!stored["image"].as_str().unwrap().starts_with("/uploads/"));

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn upload_needs_a_non_empty_image_field() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Ada").await;
    let uri = format!("/users/{user}/image");

    let (status, body) = upload(&app, &uri, "avatar", "a.png", "image/png", PNG).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Image file is required");

    let (status, body) = upload(&app, &uri, "image", "a.png", "image/png", b"").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Image file is empty");

    let ghost = uuid::Uuid::new_v4();
    let (status, _) = upload(&app, &format!("/users/{ghost}/image"), "image", "a.png", "image/png", PNG).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn experience_and_post_images_upload() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Ada").await;

    let (_, experience) = send_json(
        &app,
        Method::POST,
        &format!("/users/{user}/experiences"),
        Some(json!({
            "role": "Developer",
            "company": "Acme",
            "startDate": "2020-01-01",
            "description": "Backend",
            "area": "Remote"
        })),
    )
    .await;
    let experience = experience["id"].as_str().unwrap().to_string();

    let (status, body) = upload(
        &app,
        &format!("/users/{user}/experiences/{experience}/image"),
        "image",
        "logo.jpg",
        "image/jpeg",
        b"\xff\xd8\xff\xe0jpeg",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], experience.as_str());
    assert!(body["image"].as_str().unwrap().ends_with(".jpg"));

    let (_, post) = send_json(
        &app,
        Method::POST,
        "/posts",
        Some(json!({ "text": "Hello", "user": user })),
    )
    .await;
    let post = post["id"].as_str().unwrap().to_string();

    let (status, body) = upload(
        &app,
        &format!("/posts/{post}/image"),
        "image",
        "cat",
        "image/gif",
        b"GIF89a",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let url = body["image"].as_str().unwrap();
    assert!(url.starts_with("/uploads/") && url.ends_with(".gif"), "{url}");

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn update_cannot_blank_required_fields() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Ada").await;
    let uri = format!("/users/{user}");

    let (status, body) = send_json(&app, Method::PUT, &uri, Some(json!({ "bio": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorsList"], json!(["Bio must not be empty"]));

    let (status, _) = send_json(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "title": "", "area": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send_json(&app, Method::GET, &uri, None).await;
    assert_eq!(stored["bio"], "Hi");
    assert_eq!(stored["title"], "Engineer");

    let (status, body) = send_json(&app, Method::PUT, &uri, Some(json!({ "bio": "Hello" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bio"], "Hello");

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn friend_request_to_self_is_bad_request() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Ada").await;

    for action in ["friendRequest", "acceptRequest", "declineRequest"] {
        let (status, body) =
            send_json(&app, Method::PUT, &format!("/users/{user}/{action}/{user}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{action}");
        assert_eq!(body["message"], "You cannot send a friend request to yourself");
    }

    let (_, stored) = send_json(&app, Method::GET, &format!("/users/{user}"), None).await;
    assert_eq!(stored["requestSend"], json!([]));

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn list_pages_and_sorts_by_creation() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    for name in ["Ada", "Bob", "Cy"] {
        create_user(&app, name).await;
    }

    let names = |body: Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|user| user["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = send_json(&app, Method::GET, "/users?offset=1&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(body), ["Bob"]);

    let (_, body) = send_json(&app, Method::GET, "/users?sort=-createdAt&limit=2", None).await;
    assert_eq!(names(body), ["Cy", "Bob"]);

    let (_, body) = send_json(&app, Method::GET, "/users?sort=createdAt", None).await;
    assert_eq!(names(body), ["Ada", "Bob", "Cy"]);

    let (status, _) = send_json(&app, Method::GET, "/users?sort=email", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, Method::GET, "/users?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn profile_downloads_as_pdf() {
    let system = SocialSystem::new(32);
    let app = app(&system);
    let user = create_user(&app, "Ada").await;

    let request = Request::builder()
        .uri(format!("/users/{user}/pdf"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=profile.pdf"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));

    let ghost = uuid::Uuid::new_v4();
    let (status, _) = send(&app, Method::GET, &format!("/users/{ghost}/pdf"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    drop(app);
    system.shutdown().await.unwrap();
}
