//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use moviemaze_api::auth::jwt::{generate_access_token, JwtConfig};
use moviemaze_api::auth::password::hash_password;
use moviemaze_api::config::ServerConfig;
use moviemaze_api::router::build_app_router;
use moviemaze_api::state::AppState;
use moviemaze_api::storage::ImageStore;
use moviemaze_db::models::movie::{CreateMovie, Movie};
use moviemaze_db::models::user::{CreateUser, User};
use moviemaze_db::repositories::{MovieRepo, UserRepo};

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Upload limit used by [`test_config`].
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

const MULTIPART_BOUNDARY: &str = "moviemaze-test-boundary";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and a small upload limit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_env: "test".to_string(),
        upload_dir: PathBuf::from("target/test-uploads"),
        public_base_url: "http://localhost:5000".to_string(),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        auth_rate_limit: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Image store that keeps uploads in memory.
#[derive(Default)]
pub struct MemoryImageStore {
    pub saved: Mutex<Vec<(String, usize)>>,
    pub removed: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn save(&self, data: Vec<u8>, content_type: &str) -> anyhow::Result<String> {
        let mut saved = self.saved.lock().unwrap();
        saved.push((content_type.to_string(), data.len()));
        Ok(format!("http://localhost:5000/uploads/test-{}.img", saved.len()))
    }

    async fn remove(&self, url: &str) -> anyhow::Result<()> {
        self.removed.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Build the full application router, as `main.rs` does, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_images(pool, Arc::new(MemoryImageStore::default()))
}

pub fn build_test_app_with_images(pool: PgPool, images: Arc<MemoryImageStore>) -> Router {
    build_test_app_with(pool, images, test_config())
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_test_app_with(pool, Arc::new(MemoryImageStore::default()), config)
}

fn build_test_app_with(
    pool: PgPool,
    images: Arc<MemoryImageStore>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user directly and return it with a valid bearer token.
pub async fn create_user(pool: &PgPool, name: &str, role: &str) -> (User, String) {
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{}@test.com", name.to_lowercase()),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role: role.to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    let token = token_for(&user);
    (user, token)
}

pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn create_movie(pool: &PgPool, title: &str, added_by: i64) -> Movie {
    let input = CreateMovie {
        title: title.to_string(),
        description: format!("{title} description"),
        images: vec![],
        genres: vec![],
        year: None,
        added_by,
    };
    MovieRepo::create(pool, &input)
        .await
        .expect("movie creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, None)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// POST JSON as a client behind a proxy at `client_ip`.
pub async fn post_json_from(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    client_ip: &str,
) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, None)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", client_ip)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// GET with a `Cookie` header instead of a bearer token.
pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, None)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::POST, uri, None).body(Body::empty()).unwrap()).await
}

/// The `Set-Cookie` header of a response, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// A file part for [`post_multipart_auth`]: content type and bytes.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub content_type: &'a str,
    pub data: &'a [u8],
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
    token: &str,
) -> Response<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"upload\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
