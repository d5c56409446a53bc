use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::AppState;
use crate::config::AppConfig;
use crate::routes;
use crate::session::TranscriptStore;

/// Assemble the full application: pages, static files and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = state.config.server.request_timeout();
    let static_dir = state.config.static_dir.clone();

    routes::router()
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                let path = req.uri().path().to_string();
                match tokio::time::timeout(timeout, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => {
                        warn!(name: "server.request.timeout", path = %path, "Request timed out");
                        (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
                    }
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new(Arc::clone(&config))?;
    info!(
        name: "backend.config.loaded",
        base_url = %state.api.base_url(),
        timeout_secs = config.backend.timeout_secs,
        "Backend configuration loaded"
    );

    let _sweeper = spawn_transcript_sweeper(
        state.transcripts.clone(),
        config.session.idle_timeout(),
    );

    let app = build_router(state);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

/// Periodically drop transcripts idle longer than `idle_timeout`.
pub fn spawn_transcript_sweeper(store: TranscriptStore, idle_timeout: Duration) -> JoinHandle<()> {
    let period = (idle_timeout / 4).clamp(Duration::from_secs(1), Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = store.cleanup_expired(idle_timeout);
            if removed > 0 {
                debug!(
                    name: "session.sweep",
                    removed,
                    remaining = store.len(),
                    "Dropped idle transcripts"
                );
            }
        }
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(name: "server.signal.failed", error = %err, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(name: "server.shutdown", "Shutdown signal received");
}
