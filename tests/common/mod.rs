//! Common Test Utilities
//!
//! A [`TestApp`] drives the real router over the in-memory document store,
//! with uploads written to a temporary directory.

#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use inficom_api::config::{
    AuthSettings, CorsSettings, DatabaseSettings, JwtSettings, RateLimitSettings, ServerSettings,
    Settings, SnowflakeSettings, StorageBackend, UploadSettings,
};
use inficom_api::infrastructure::repositories::Repositories;
use inficom_api::shared::snowflake::DEFAULT_EPOCH;
use inficom_api::startup::{build_router, AppState};

const BOUNDARY: &str = "inficom-test-boundary";

/// Settings for a test run: in-memory store, no rate limiting.
pub fn test_settings(upload_dir: &Path) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            backend: StorageBackend::Memory,
            url: None,
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
        },
        jwt: JwtSettings {
            secret: "test-secret-that-is-at-least-32-characters".into(),
            expiry_days: 7,
        },
        auth: AuthSettings {
            allow_registration: true,
        },
        admin: None,
        uploads: UploadSettings {
            dir: upload_dir.to_path_buf(),
            public_path: "/uploads".into(),
            max_file_size: 1024 * 1024,
        },
        snowflake: SnowflakeSettings {
            machine_id: 1,
            epoch: DEFAULT_EPOCH,
        },
        rate_limit: RateLimitSettings {
            enabled: false,
            requests_per_second: 1.0,
            burst_size: 10,
        },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:3000".into()],
        },
        body_limit_bytes: 1024 * 1024,
        environment: "test".into(),
    }
}

/// Buffered response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// One part of a multipart body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

/// A PNG file part for the `image` field.
pub fn png(filename: &str) -> Part<'_> {
    Part::File {
        name: "image",
        filename,
        content_type: "image/png",
        bytes: b"\x89PNG\r\n\x1a\nfake-image-data",
    }
}

/// Encode `parts` as `multipart/form-data`.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Test application
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with(|_| {}).await
    }

    /// Build an app with adjusted settings.
    pub async fn with(configure: impl FnOnce(&mut Settings)) -> Self {
        let upload_dir = TempDir::new().expect("temp upload dir");
        let mut settings = test_settings(upload_dir.path());
        configure(&mut settings);

        let state = AppState::new(settings, Repositories::in_memory(), None);
        state.uploads.ensure_dir().await.expect("upload dir");

        Self {
            router: build_router(state.clone()),
            state,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match token {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Self::builder(Method::GET, uri, None).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> TestResponse {
        self.send(
            Self::builder(Method::GET, uri, Some(token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> TestResponse {
        self.send(
            Self::builder(method, uri, token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.json(Method::POST, uri, token, body).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.json(Method::PUT, uri, token, body).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(
            Self::builder(Method::DELETE, uri, token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        parts: &[Part<'_>],
    ) -> TestResponse {
        self.send(
            Self::builder(method, uri, token)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(parts)))
                .unwrap(),
        )
        .await
    }

    pub async fn form(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: &str,
    ) -> TestResponse {
        self.send(
            Self::builder(method, uri, token)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Register a fresh account and return its token.
    pub async fn token(&self) -> String {
        let response = self
            .post_json(
                "/api/auth/register",
                None,
                json!({
                    "name": "Test Admin",
                    "email": unique_email(),
                    "password": "password123",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.json()["token"]
            .as_str()
            .expect("token in register response")
            .to_string()
    }

    /// Number of files in the upload directory.
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Path of a stored upload from its public URL.
    pub fn upload_path(&self, url: &str) -> std::path::PathBuf {
        let name = url.rsplit('/').next().unwrap_or_default();
        self.upload_dir.path().join(name)
    }
}

/// Generate a unique test email
pub fn unique_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}
