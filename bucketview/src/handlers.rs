//! Request handlers for the browse and download routes

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tracing::{error, info};

use bucketview_core::BrowseError;

use crate::router::AppState;
use crate::views;

/// Handler-level error wrapper turning [`BrowseError`] into an HTML
/// error page with the mapped status code.
pub struct AppError(BrowseError);

impl From<BrowseError> for AppError {
    fn from(err: BrowseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        error!(error = %self.0, status = %status, "request failed");
        (status, Html(views::render_error(&self.0.to_string()))).into_response()
    }
}

/// `GET /` — bucket index.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let buckets = state.browser.buckets().await?;
    info!(count = buckets.len(), "rendered bucket index");
    Ok(Html(views::render_index(&buckets)))
}

/// `GET /browse` — no bucket selected, send the client back to the index.
pub async fn browse_root() -> Response {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, "/")
        .body(Body::empty())
        .unwrap()
}

/// `GET /browse/:bucket` — bucket root listing.
pub async fn browse_bucket(
    State(state): State<Arc<AppState>>,
    Path(bucket): Path<String>,
) -> Result<Html<String>, AppError> {
    render_listing(&state, &bucket, "").await
}

/// `GET /browse/:bucket/*path` — listing under a path inside the bucket.
pub async fn browse_path(
    State(state): State<Arc<AppState>>,
    Path((bucket, path)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    render_listing(&state, &bucket, &path).await
}

async fn render_listing(
    state: &AppState,
    bucket: &str,
    path: &str,
) -> Result<Html<String>, AppError> {
    let listing = state.browser.browse(bucket, path).await?;
    info!(
        bucket,
        path,
        keys = listing.keys.len(),
        prefixes = listing.prefixes.len(),
        "rendered listing"
    );
    Ok(Html(views::render_browser(bucket, path, &listing)))
}

/// `GET /download/:bucket/*path` — fetch the object behind a display key
/// and serve it as an attachment. The scratch file is deleted once the
/// response body has been read from disk.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path((bucket, display_key)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let scratch = state.browser.download(&bucket, &display_key).await?;
    let body = tokio::fs::read(scratch.path())
        .await
        .map_err(BrowseError::from)?;

    info!(
        bucket,
        display_key,
        bytes = body.len(),
        file_name = scratch.file_name(),
        "serving download"
    );

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", scratch.file_name()),
        )
        .body(Body::from(body))
        .unwrap())
}
