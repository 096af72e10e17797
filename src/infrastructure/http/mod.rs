use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    health::{self, HealthState},
    podcast::PodcastController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::request_id_middleware;

/// Build the application router with all routes configured
pub fn build_router(health_state: HealthState, podcast_controller: Arc<PodcastController>) -> Router {
    // Podcast routes (public, artifacts are addressed by unguessable ids)
    let podcast_routes = Router::new()
        .route("/api/podcasts", post(PodcastController::create))
        .route("/api/podcasts/:id", get(PodcastController::get_metadata))
        .route("/api/podcasts/:id/audio", get(PodcastController::get_audio))
        .route(
            "/api/podcasts/:id/transcript",
            get(PodcastController::get_transcript),
        )
        .with_state(podcast_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_state)
        .merge(podcast_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
