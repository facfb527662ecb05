//! Shared test helpers: an in-process mock of the PeerLink transfer
//! backend, exposing the upload/download contract on an ephemeral port.

#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::Mutex;

use peerlink::{config::Config, Client};

pub const FIRST_PORT: u16 = 5001;

/// A served file: the advertised name (`None` means the response carries no
/// Content-Disposition header) plus its bytes.
type Served = (Option<String>, Vec<u8>);

#[derive(Clone)]
pub struct Backend {
    files: Arc<Mutex<HashMap<u16, Served>>>,
    next_port: Arc<Mutex<u16>>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            next_port: Arc::new(Mutex::new(FIRST_PORT)),
        }
    }
}

impl Backend {
    pub async fn insert(&self, port: u16, name: Option<&str>, bytes: &[u8]) {
        self.files
            .lock()
            .await
            .insert(port, (name.map(str::to_string), bytes.to_vec()));
    }
}

async fn handle_upload(
    State(backend): State<Backend>,
    mut multipart: Multipart,
) -> Json<Vec<serde_json::Value>> {
    let mut entries = Vec::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let bytes = field.bytes().await.unwrap();

        let port = {
            let mut next = backend.next_port.lock().await;
            let port = *next;
            *next += 1;
            port
        };

        backend
            .files
            .lock()
            .await
            .insert(port, (Some(filename.clone()), bytes.to_vec()));
        entries.push(serde_json::json!({ "port": port, "filename": filename }));
    }

    Json(entries)
}

async fn handle_download(Path(port): Path<u16>, State(backend): State<Backend>) -> Response {
    match backend.files.lock().await.get(&port) {
        Some((name, bytes)) => {
            let mut response = bytes.clone().into_response();
            if let Some(name) = name {
                response.headers_mut().insert(
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{name}\"").parse().unwrap(),
                );
            }
            response
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn spawn_backend() -> (Backend, SocketAddr) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/api/upload", post(handle_upload))
        .route("/api/download/:port", get(handle_download))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, addr)
}

/// Backend whose upload endpoint answers with a single entry no matter how
/// many files were submitted.
pub async fn spawn_miscounting_backend() -> SocketAddr {
    let app = Router::new().route(
        "/api/upload",
        post(|| async { Json(serde_json::json!([{ "port": 5001, "filename": "a.txt" }])) }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Backend whose upload endpoint always reports an internal error.
pub async fn spawn_failing_backend() -> SocketAddr {
    let app = Router::new().route(
        "/api/upload",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

pub fn test_client(addr: SocketAddr, download_dir: &std::path::Path) -> Client {
    Client::with_config(Config {
        backend_url: format!("http://{addr}"),
        download_dir: download_dir.to_path_buf(),
        request_timeout_secs: 5,
    })
    .unwrap()
}
