//! Test helpers for driving the HTTP API in-process
//!
//! Requests go through the full router (middleware included) with
//! `tower::ServiceExt::oneshot`; no socket is bound.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use clan_api::{create_app, AppState};
use clan_common::{
    AppConfig, AppSettings, ClashApiConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    RateLimitConfig, ServerConfig,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::fixtures::{TestWorld, JWT_SECRET};

/// Configuration for an in-process app. Nothing here is dialed.
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "clan-server-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            statement_timeout_ms: 5000,
            migrations_dir: None,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_expiry: 900,
        },
        admins: clan_common::AdminConfig::default(),
        clash_api: ClashApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token: "unused".to_string(),
            timeout_secs: 1,
            requests_per_second: 20,
        },
        discord: None,
        rate_limit: RateLimitConfig {
            requests_per_second: 1,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
    }
}

/// Status and JSON body of a response (`Null` when the body is empty)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `error.code` of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }

    /// Panic with the body unless the status matches
    #[track_caller]
    pub fn assert_status(&self, expected: StatusCode) -> &Value {
        assert_eq!(
            self.status, expected,
            "unexpected status, body: {}",
            self.body
        );
        &self.body
    }
}

/// The router over a test world
pub struct TestApp {
    pub world: TestWorld,
    router: Router,
}

impl TestApp {
    pub fn new(world: TestWorld) -> Self {
        let state = AppState::new(world.context(), test_config());
        let router = create_app(state).expect("app builds");
        Self { world, router }
    }

    pub fn seeded() -> Self {
        Self::new(TestWorld::seeded())
    }

    /// Send one request, authenticated as `account` when given
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        account: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(account) = account {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.world.token(account)),
            );
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body can be read");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str, account: &str) -> TestResponse {
        self.request(Method::GET, path, Some(account), None).await
    }

    pub async fn post(&self, path: &str, account: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(account), Some(body))
            .await
    }

    pub async fn patch(&self, path: &str, account: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, path, Some(account), Some(body))
            .await
    }

    pub async fn put(&self, path: &str, account: &str, body: Option<Value>) -> TestResponse {
        self.request(Method::PUT, path, Some(account), body).await
    }

    pub async fn delete(&self, path: &str, account: &str) -> TestResponse {
        self.request(Method::DELETE, path, Some(account), None)
            .await
    }
}
