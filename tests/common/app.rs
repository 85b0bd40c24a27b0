//! In-memory test application
//!
//! Every [`TestApp`] owns a fresh in-memory SQLite database with migrations
//! applied, and drives the real router through `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use socialgram::backend::auth::{create_token, DEFAULT_TOKEN_TTL};
use socialgram::backend::routes::create_router;
use socialgram::backend::server::config::ServerConfigBuilder;
use socialgram::backend::server::{load_database, AppState, ServerConfig};
use socialgram::backend::users::db as users_db;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

/// A seeded user and a valid session token for them
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
}

/// Status, headers and parsed JSON body of a finished request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    pub pool: SqlitePool,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    /// Configuration used by [`TestApp::new`]; tweak it for policy tests
    pub fn config() -> ServerConfigBuilder {
        ServerConfig::builder()
            .database_url("sqlite::memory:")
            .jwt_secret(TEST_SECRET)
            .static_dir("target/no-frontend-in-tests")
    }

    pub async fn new() -> Self {
        let config = Self::config().build().expect("Invalid test config");
        Self::with_config(config).await
    }

    pub async fn with_config(config: ServerConfig) -> Self {
        let pool = load_database(&config)
            .await
            .expect("Failed to open test database");
        let state = AppState::new(pool.clone(), config);
        let router = create_router(state.clone());

        Self {
            pool,
            state,
            router,
        }
    }

    pub async fn create_user(&self, username: &str) -> TestUser {
        let user = users_db::create_user(&self.pool, username, &format!("{username}@example.com"))
            .await
            .expect("Failed to create test user");
        let token = create_token(user.id, TEST_SECRET, DEFAULT_TOKEN_TTL)
            .expect("Failed to sign test token");

        TestUser {
            id: user.id,
            username: user.username,
            token,
        }
    }

    /// Send a raw request and hand back the unread response
    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    /// Send a request as `user` (bearer token) with an optional JSON body
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<&TestUser>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", user.token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        read_response(self.send(request).await).await
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> TestResponse {
        self.request(Method::GET, uri, Some(user), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(user), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user: &TestUser) -> TestResponse {
        self.request(Method::PUT, uri, Some(user), None).await
    }

    pub async fn delete(&self, uri: &str, user: &TestUser) -> TestResponse {
        self.request(Method::DELETE, uri, Some(user), None).await
    }

    /// Create a post through the API and return its id
    pub async fn create_post(&self, author: &TestUser, caption: &str) -> Uuid {
        let response = self
            .post(
                "/api/v1/post/addpost",
                author,
                serde_json::json!({
                    "caption": caption,
                    "image": "https://images.example.com/p.jpg",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);

        response.body["post"]["_id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("Post id missing from response")
    }

    /// The caller's notifications, newest first
    pub async fn notifications(&self, user: &TestUser) -> Vec<Value> {
        let response = self.get("/api/v1/notification?limit=100", user).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["notifications"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }
}

pub async fn read_response(response: axum::response::Response) -> TestResponse {
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
