//! Shared setup for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use authgate::{
    app::build_app,
    auth::{
        jwt::JwtKeys,
        password::{HashScheme, PasswordHasher},
    },
    config::{AppConfig, JwtConfig},
    state::AppState,
    users::InMemoryUserStore,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "postgres://unused".into(),
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: "test-secret-key-for-testing-only".into(),
            issuer: "authgate-test".into(),
            audience: "authgate-test-users".into(),
            ttl_minutes: 5,
        },
        password_scheme: HashScheme::Bcrypt,
    }
}

pub struct TestApp {
    pub app: Router,
    pub keys: JwtKeys,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let keys = JwtKeys::from_config(&config.jwt);
        let state = AppState::with_hasher(
            config,
            Arc::new(InMemoryUserStore::new()),
            PasswordHasher::new(HashScheme::Bcrypt).with_cost(4),
            keys.clone(),
        );
        Self {
            app: build_app(state),
            keys,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, path: &str, authorization: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn signup(&self, email: &str, name: &str, password: &str) -> (StatusCode, String) {
        self.post_json(
            "/auth/signup",
            serde_json::json!({ "email": email, "name": name, "password": password }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, String) {
        self.post_json(
            "/auth/login",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Signs up and logs in, returning the access token.
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let (status, _) = self.signup(email, "Test User", password).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self.login(email, password).await;
        assert_eq!(status, StatusCode::CREATED);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }
}
