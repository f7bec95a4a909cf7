#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use pawmap_api::config::ServerConfig;
use pawmap_api::router::build_app_router;
use pawmap_api::state::AppState;
use pawmap_api::store::PetStore;
use pawmap_api::uploads::UploadDir;

pub const BOUNDARY: &str = "pawmap-test-boundary";

/// A router over a throwaway data directory. The directory lives as long as
/// this value.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn data_file(&self) -> PathBuf {
        self.state.store.path().to_path_buf()
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.state.uploads.root().to_path_buf()
    }
}

/// Build a test `ServerConfig` rooted in `dir`.
pub fn test_config(dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_file: dir.join("data.json"),
        upload_dir: dir.join("uploads"),
        static_dir: dir.join("static"),
        max_upload_bytes: pawmap_api::config::DEFAULT_MAX_UPLOAD_BYTES,
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over a fresh temporary directory.
pub async fn build_test_app() -> TestApp {
    build_test_app_with(|_| {}).await
}

/// Like [`build_test_app`], with `configure` applied to the config first.
pub async fn build_test_app_with(configure: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut config = test_config(dir.path());
    configure(&mut config);

    let state = AppState {
        store: Arc::new(PetStore::open(&config.data_file).await),
        uploads: Arc::new(UploadDir::new(&config.upload_dir)),
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
        dir,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request failed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// One part of a multipart body.
pub enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            FormPart::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[FormPart<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

/// The standard create form for a pet called `name`, submitted at
/// `submission_time`.
pub fn pet_form<'a>(name: &'a str, submission_time: &'a str) -> Vec<FormPart<'a>> {
    vec![
        FormPart::Text("pet_name", name),
        FormPart::Text("contact", "0300-1234567"),
        FormPart::Text("description", "Brown, answers to her name"),
        FormPart::Text("latitude", "31.5204"),
        FormPart::Text("longitude", "74.3587"),
        FormPart::Text("submissionTime", submission_time),
        FormPart::File {
            name: "pet_image",
            file_name: "my dog.png",
            bytes: b"\x89PNG fake",
        },
    ]
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is JSON")
}
