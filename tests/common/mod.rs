#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use migration::{Migrator, MigratorTrait};
use scribe::{
    app,
    notes::staging::Staging,
    storage::{local::LocalStorage, SharedStorage},
    AppState,
};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "scribe-test-boundary";
const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub staging: Staging,
    pub dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json response body")
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a [u8]),
}

impl TestApp {
    /// App backed by a temporary SQLite file and a local bucket directory.
    pub async fn new() -> Self {
        Self::with_storage(|root| Arc::new(LocalStorage::new(root.join("bucket")))).await
    }

    pub async fn with_storage(storage: impl FnOnce(&Path) -> SharedStorage) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");

        let url = format!("sqlite://{}?mode=rwc", dir.path().join("notes.db").display());
        let db = Database::connect(url).await.expect("db connection");
        Migrator::up(&db, None).await.expect("create tables");

        let staging = Staging::new(dir.path().join("uploads"), dir.path().join("downloads"));
        staging.ensure().await.expect("staging directories");

        let state = AppState {
            db: db.clone(),
            storage: storage(dir.path()),
            staging: staging.clone(),
        };

        Self {
            router: app(state, MAX_UPLOAD_BYTES),
            db,
            staging,
            dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        let status = response.status();
        let headers = response.headers().clone();
        let body = hyper::body::to_bytes(response.into_body())
            .await
            .expect("response body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<Body>) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .expect("request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn upload(&self, parts: &[Part<'_>]) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri("/upload/")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(parts)))
                .expect("request"),
        )
        .await
    }

    pub async fn create_user(&self, name: &str) -> Value {
        let response = self
            .post_json(
                "/users/",
                json!({ "name": name, "profile_image": format!("{name}.png") }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()
    }

    pub async fn create_course(&self, code: &str) -> Value {
        let response = self
            .post_json(
                "/courses/",
                json!({ "code": code, "name": "Intro to Python", "description": "Basics" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()
    }

    pub fn bucket_path(&self, key: &str) -> std::path::PathBuf {
        self.dir.path().join("bucket").join(key)
    }
}

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
            Part::File(name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"notes.pdf\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
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

/// Number of entries directly inside `dir`.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|dir| dir.count()).unwrap_or(0)
}
