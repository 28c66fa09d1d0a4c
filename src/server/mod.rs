//! HTTP server: the public page, its JSON API and the owner dashboard API.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::get,
    routing::post,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod auth;
mod routes;
pub mod state;

use routes::{
    analytics_report_handler, create_link_handler, delete_link_handler, health_handler,
    my_profile_handler, page_handler, profile_links_handler, record_event_handler,
    update_link_handler, update_profile_handler, upload_handler, vcf_handler,
};
pub use state::AppState;

use crate::services::uploads::MAX_IMAGE_BYTES;

/// Multipart framing on top of the largest accepted image.
const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

/// Builds the application router over `state`.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/{username}", get(page_handler))
        .route("/api/profile/me", get(my_profile_handler))
        .route("/api/profile/update", post(update_profile_handler))
        .route("/api/profile/{username}/links", get(profile_links_handler))
        .route("/api/vcf/{username}", get(vcf_handler))
        .route("/api/social/create", post(create_link_handler))
        .route("/api/social/update", post(update_link_handler))
        .route("/api/social/delete", post(delete_link_handler))
        .route(
            "/api/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/analytics", post(record_event_handler).get(analytics_report_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serves `state` on `0.0.0.0:{port}` until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error string if the port cannot be bound or the server fails.
pub async fn start_server(state: AppState) -> Result<(), String> {
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(Arc::new(state));

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| format!("Failed to bind {address}: {e}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
