use std::path::{Component, Path, PathBuf};

use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, Uri},
    response::{AppendHeaders, IntoResponse, Response},
};
use tokio::fs::File;
use tracing::error;

use crate::types::app_state::AppState;

pub const INDEX_FILE: &str = "index.html";
pub const MISSING_APP_MESSAGE: &str = "Error loading the app. Please try again later.";

/// Serves a file from the application bundle, or the bundle's entry document
/// for any other path so the client-side router can handle it.
pub async fn get_static(State(state): State<AppState>, uri: Uri) -> Response {
    if let Some(path) = resolve_asset(&state.static_dir, uri.path()) {
        if let Some(file) = open_file(&path).await {
            return stream_file(file, content_type(&path));
        }
    }

    let index = state.static_dir.join(INDEX_FILE);
    match open_file(&index).await {
        Some(file) => stream_file(file, "text/html; charset=utf-8"),
        None => {
            error!("Entry document {} is missing", index.display());
            (StatusCode::INTERNAL_SERVER_ERROR, MISSING_APP_MESSAGE).into_response()
        }
    }
}

/// Maps a request path onto the bundle directory. Paths that would escape the
/// directory are refused.
fn resolve_asset(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));

    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(relative))
}

async fn open_file(path: &Path) -> Option<File> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    if !metadata.is_file() {
        return None;
    }
    File::open(path).await.ok()
}

fn stream_file(file: File, content_type: &'static str) -> Response {
    let stream = tokio_util::io::ReaderStream::new(file);
    let headers = AppendHeaders([("content-type", content_type)]);

    (headers, Body::from_stream(stream)).into_response()
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
