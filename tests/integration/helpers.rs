//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use mirage_api::{AppState, build_app};
use mirage_core::config::AppConfig;
use mirage_database::Repositories;

const BOUNDARY: &str = "mirage-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Root of the local object store; removed on drop
    pub media_root: TempDir,
}

/// One part of a multipart request.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// `name=value` of the first `Set-Cookie` header, plus its attributes.
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Cookie pair to send back, e.g. `mqk=eyJ...`.
    pub fn session(&self) -> String {
        self.set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .expect("response set no cookie")
            .to_string()
    }

    pub fn error_type(&self) -> &str {
        self.body["error"]["type"].as_str().unwrap_or_default()
    }

    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application on in-memory repositories
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::new`], with a hook to adjust configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let media_root = tempfile::tempdir().expect("Failed to create media dir");

        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.auth.session_secret = "integration-test-session-secret".to_string();
        config.storage.provider = "local".to_string();
        config.storage.public_base_url = "http://localhost:8080/media".to_string();
        config.storage.local.root_path = media_root.path().to_string_lossy().into_owned();
        adjust(&mut config);

        let storage = mirage_storage::connect(&config.storage)
            .await
            .expect("Failed to init storage");
        let state = AppState::new(config.clone(), Repositories::memory(), storage);

        Self {
            router: build_app(state),
            config,
            media_root,
        }
    }

    /// Register an account and return its session cookie.
    pub async fn register(&self, username: &str) -> String {
        let response = self
            .request(
                "POST",
                "/v1/accounts/register",
                Some(serde_json::json!({
                    "email": format!("{username}@example.com"),
                    "username": username,
                    "displayName": format!("{username} display"),
                    "password": "password123",
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        response.session()
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(session) = session {
            req = req.header(header::COOKIE, session);
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Make a multipart request to the test app
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        parts: &[Part<'_>],
        session: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    filename,
                    content_type,
                    data,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder().method(method).uri(path).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(session) = session {
            req = req.header(header::COOKIE, session);
        }

        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    /// Fetch raw bytes, e.g. a stored media object.
    pub async fn get_bytes(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}

/// Path part of a media URL issued by the local store.
pub fn media_path(url: &str) -> &str {
    url.strip_prefix("http://localhost:8080").unwrap_or(url)
}
