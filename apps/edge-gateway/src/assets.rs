//! Static-asset fallback.
//!
//! Paths matching no API prefix land here. The collaborator is optional: a
//! deployment without `GATEWAY_ASSETS_DIR` answers `500` for non-API paths,
//! mirroring a missing asset binding.

use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::response::{IntoResponse, Response};

use crate::error::GatewayError;
use crate::server::cors::preflight;

/// Method list advertised on asset responses.
pub const ASSET_METHODS_HEADER: &str = "GET,HEAD,OPTIONS";

/// Filesystem-backed static asset server.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Serve files from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Serve one request path. `/` maps to `index.html`; traversal outside
    /// the root is treated as not found.
    pub async fn serve(&self, method: &Method, path: &str) -> Response {
        if method != Method::GET && method != Method::HEAD {
            return GatewayError::MethodNotAllowed.into_response();
        }

        let Some(relative) = sanitize(path) else {
            return GatewayError::NotFound.into_response();
        };

        let file = self.root.join(&relative);
        let Ok(contents) = tokio::fs::read(&file).await else {
            tracing::debug!(path = %file.display(), "Asset not found");
            return GatewayError::NotFound.into_response();
        };

        let body = if method == Method::HEAD {
            Body::empty()
        } else {
            Body::from(contents)
        };
        let mut response = Response::new(body);
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(content_type_for(&relative)),
        );
        response
    }
}

/// Fallback handler body: delegate to the asset server if one is bound.
pub async fn handle(assets: Option<&DirAssets>, req: Request) -> Response {
    if req.method() == Method::OPTIONS {
        return preflight(ASSET_METHODS_HEADER);
    }

    match assets {
        Some(assets) => assets.serve(req.method(), req.uri().path()).await,
        None => GatewayError::Configuration(
            "Static assets unavailable. Set GATEWAY_ASSETS_DIR.".to_string(),
        )
        .into_response(),
    }
}

/// Normalize a URI path to a safe relative file path, or `None` when it
/// escapes the root.
fn sanitize(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Some(PathBuf::from("index.html"));
    }

    let relative = Path::new(trimmed);
    let mut clean = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(clean)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn root_path_maps_to_index() {
        assert_eq!(sanitize("/"), Some(PathBuf::from("index.html")));
        assert_eq!(sanitize(""), Some(PathBuf::from("index.html")));
    }

    #[test]
    fn traversal_is_rejected() {
        assert_eq!(sanitize("/../etc/passwd"), None);
        assert_eq!(sanitize("/a/../../b"), None);
    }

    #[test]
    fn normal_paths_pass_through() {
        assert_eq!(sanitize("/app.js"), Some(PathBuf::from("app.js")));
        assert_eq!(
            sanitize("/static/app.css"),
            Some(PathBuf::from("static/app.css"))
        );
    }

    #[test]
    fn content_types() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("app.js")), "text/javascript");
        assert_eq!(
            content_type_for(Path::new("blob.bin")),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn serves_files_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let assets = DirAssets::new(dir.path());
        let response = assets.serve(&Method::GET, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirAssets::new(dir.path());
        let response = assets.serve(&Method::GET, "/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_read_methods_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirAssets::new(dir.path());
        let response = assets.serve(&Method::POST, "/index.html").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
