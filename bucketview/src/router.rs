//! HTTP router for bucketview

use std::sync::Arc;

use axum::extract::Request;
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

use bucketview_s3::Browser;

use crate::handlers;

/// Service state shared by all handlers
pub struct AppState {
    pub browser: Browser,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/browse", get(handlers::browse_root))
        .route("/browse/:bucket", get(handlers::browse_bucket))
        .route("/browse/:bucket/*path", get(handlers::browse_path))
        .route("/download/:bucket/*path", get(handlers::download))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Serve the router with trailing-slash normalization, so `/browse/b/p`
/// and `/browse/b/p/` hit the same route.
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> std::io::Result<()> {
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);
    axum::serve(
        listener,
        axum::ServiceExt::<Request>::into_make_service(app),
    )
    .await
}
