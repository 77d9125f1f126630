//! Preview servers.
//!
//! Two modes, both for local inspection before publishing:
//!
//! - **Live** ([`run_preview`]): every page is rendered once at startup with
//!   an empty URL suffix and served at `/<page name>` (`index` also answers
//!   at `/`). A page whose render failed answers 500 without taking the
//!   server down. Assets are read from disk per request.
//! - **Static** ([`run_preview_static`]): serves an already-built output
//!   tree as-is, links carrying their `.html` suffix.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use log::{error, info};
use tokio::net::TcpListener;

use crate::error::Result;
use crate::site::Site;

/// Per-page render outcome captured at server startup. Errors are kept so the
/// matching route can answer 500, mirroring a failed build without hiding it.
type PageMap = HashMap<String, std::result::Result<String, String>>;

struct LiveState {
    pages: PageMap,
    assets_prefix: String,
    assets_dir: PathBuf,
}

struct StaticState {
    root: PathBuf,
}

/// Render every page of `site` and serve the results over HTTP.
pub async fn run_preview(site: &Site, addr: &str) -> Result<()> {
    let state = Arc::new(LiveState {
        pages: render_all(site),
        assets_prefix: site.assets_url_path(),
        assets_dir: site.config().assets_dir.clone(),
    });

    let app = Router::new()
        .fallback(serve_live)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    info!("preview server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Serve a built output tree at `root` over HTTP.
pub async fn run_preview_static(root: &Path, addr: &str) -> Result<()> {
    let state = Arc::new(StaticState {
        root: root.to_path_buf(),
    });

    let app = Router::new()
        .fallback(serve_static)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    info!("static preview listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn render_all(site: &Site) -> PageMap {
    site.paths()
        .iter()
        .map(|path| {
            let page_name = site.page_name(path);
            let rendered = site
                .render_page(path)
                .map(|(_, html)| html)
                .map_err(|e| e.to_string());
            if let Err(e) = &rendered {
                error!("failed to render {page_name}: {e}");
            }
            (page_name, rendered)
        })
        .collect()
}

async fn serve_live(State(state): State<Arc<LiveState>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if !state.assets_prefix.is_empty() {
        if let Some(rest) = path.strip_prefix(&format!("{}/", state.assets_prefix)) {
            return serve_file(&state.assets_dir, rest).await;
        }
    }

    let page_name = if path.is_empty() { "index" } else { path };
    match state.pages.get(page_name) {
        Some(Ok(html)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html.clone(),
        )
            .into_response(),
        Some(Err(_)) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn serve_static(State(state): State<Arc<StaticState>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let rel = if path.is_empty() { "index.html" } else { path };
    serve_file(&state.root, rel).await
}

/// Read and serve one file beneath `root`. Requests escaping the root via
/// parent components are rejected.
async fn serve_file(root: &Path, rel: &str) -> Response {
    let Some(rel) = sanitize(rel) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let full = root.join(&rel);

    match tokio::fs::read(&full).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type(&rel))],
            bytes,
        )
            .into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Normalize a request path to a safe relative path, or reject it.
fn sanitize(rel: &str) -> Option<PathBuf> {
    let path = Path::new(rel);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
