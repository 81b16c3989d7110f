//! Shared test helpers for integration tests.
//!
//! Tests need a PostgreSQL database in `DATABASE_URL`; without one every
//! test returns early. Users get unique names so tests can share a
//! database and run in parallel.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use momentos_core::AppResult;
use momentos_core::config::AppConfig;
use momentos_core::traits::Mailer;
use momentos_core::traits::mailer::EmailMessage;
use momentos_database::connection::DatabasePool;

/// Password used for every test account.
pub const PASSWORD: &str = "Praia!2026x";

/// Captures outgoing email instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

impl RecordingMailer {
    /// Messages sent to `to`, oldest first.
    pub fn sent_to(&self, to: &str) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == to)
            .cloned()
            .collect()
    }

    /// The reset code from the latest message sent to `to`.
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        let message = self.sent_to(to).pop()?;
        let (_, rest) = message.text_body.split_once("code is: ")?;
        Some(rest.chars().take_while(|c| c.is_ascii_digit()).collect())
    }
}

/// A registered account with its cookies.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub session: Option<String>,
    pub csrf: Option<String>,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Captured outgoing email
    pub mailer: Arc<RecordingMailer>,
    /// Media root, removed when the app is dropped
    _media_dir: TempDir,
}

impl TestApp {
    /// Build the application against `DATABASE_URL`, or `None` when unset.
    pub async fn spawn() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        };

        let media_dir = tempfile::tempdir().expect("Failed to create media dir");
        let mut config = AppConfig::with_database_url(&url).expect("Failed to build config");
        config.media.root = media_dir.path().to_string_lossy().into_owned();
        config.database.max_connections = 5;

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        momentos_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let mailer = Arc::new(RecordingMailer::default());
        let state = momentos_api::build_state(config.clone(), db_pool.clone(), mailer.clone())
            .await
            .expect("Failed to build state");

        Some(Self {
            router: momentos_api::build_app(state),
            db_pool,
            config,
            mailer,
            _media_dir: media_dir,
        })
    }

    /// A username no other test uses.
    pub fn unique_name(prefix: &str) -> String {
        format!("{prefix}_{}", &Uuid::new_v4().simple().to_string()[..10])
    }

    /// Register a fresh account without logging in.
    pub async fn register(&self, prefix: &str) -> TestUser {
        let username = Self::unique_name(prefix);
        let email = format!("{username}@example.com");

        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(json!({
                    "username": username,
                    "email": email,
                    "password": PASSWORD,
                    "password2": PASSWORD,
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

        TestUser {
            id: response.body["data"]["id"].as_str().unwrap().to_string(),
            username,
            email,
            password: PASSWORD.to_string(),
            session: None,
            csrf: None,
        }
    }

    /// Log `user` in, storing the session and CSRF cookies on it.
    pub async fn login(&self, user: &mut TestUser) -> TestResponse {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({
                    "username": user.username,
                    "password": user.password,
                })),
                None,
            )
            .await;
        user.session = response.cookies.get("sessionid").cloned();
        user.csrf = response.cookies.get("csrftoken").cloned();
        response
    }

    /// Register and log in.
    pub async fn signup(&self, prefix: &str) -> TestUser {
        let mut user = self.register(prefix).await;
        let response = self.login(&mut user).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        user
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<&TestUser>,
    ) -> TestResponse {
        let body = body
            .map(|b| serde_json::to_vec(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, "application/json", body, user).await
    }

    /// Make a multipart request to the test app
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        form: MultipartForm,
        user: Option<&TestUser>,
    ) -> TestResponse {
        let (content_type, body) = form.finish();
        self.send(method, path, &content_type, body, user).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
        user: Option<&TestUser>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, content_type);

        if let Some(user) = user {
            let mut cookies = Vec::new();
            if let Some(session) = &user.session {
                cookies.push(format!("sessionid={session}"));
            }
            if let Some(csrf) = &user.csrf {
                cookies.push(format!("csrftoken={csrf}"));
                req = req.header("x-csrftoken", csrf);
            }
            if !cookies.is_empty() {
                req = req.header(COOKIE, cookies.join("; "));
            }
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            cookies,
        }
    }

    /// Upload a moment owned by `user` and return its JSON.
    pub async fn create_moment(
        &self,
        user: &TestUser,
        title: &str,
        tags: &[&str],
        is_private: bool,
    ) -> Value {
        let mut form = MultipartForm::new()
            .text("title", title)
            .text("description", "Gravado na praia")
            .text("duration", "12")
            .text("is_private", if is_private { "true" } else { "false" })
            .file("video", "clip.mp4", "video/mp4", b"fake video bytes");
        for tag in tags {
            form = form.text("tags", tag);
        }

        let response = self.multipart("POST", "/api/momentos", form, Some(user)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create moment failed: {:?}",
            response.body
        );
        response.body["data"].clone()
    }

    /// Set a moment's view counter directly.
    pub async fn set_views(&self, moment_id: &str, views: i64) {
        let id = Uuid::parse_str(moment_id).unwrap();
        sqlx::query("UPDATE moments SET views = $1 WHERE id = $2")
            .bind(views)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to set views");
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Cookies set by the response
    pub cookies: HashMap<String, String>,
}

/// Hand-built `multipart/form-data` body.
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: format!("----momentos{}", Uuid::new_v4().simple()),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}
