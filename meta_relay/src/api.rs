use anyhow::{Context, Result};
use axum::{
    extract::{rejection::PathRejection, DefaultBodyLimit, Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;
use uuid::Uuid;

use crate::command::RelayCommand;
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::store::FrameStore;

/// Route the game client posts metadata to.
pub const RELAY_ROUTE: &str = "/metaFromUnity";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FrameStore>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<FrameStore>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    frames: usize,
    latest: Option<u64>,
    session: Uuid,
    session_started_at: DateTime<Utc>,
    uptime_secs: i64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum CommandResponse {
    Cleared { removed: usize, session: Uuid },
    Stored { frame: u64, bytes: usize },
}

#[derive(Debug, Serialize)]
struct FrameListResponse {
    frames: Vec<u64>,
    latest: Option<u64>,
}

pub fn create_router(state: AppState, config: &RelayConfig) -> Router {
    let mut router = Router::new()
        // Game client
        .route(RELAY_ROUTE, post(relay_command))

        // Overlay polling
        .route("/frames", get(list_frames))
        .route("/frames/latest", get(latest_frame))
        .route("/frames/:frame", get(get_frame))

        // Health & Status
        .route("/health", get(health_check));

    if let Some(dir) = &config.static_dir {
        info!("Serving static files from {:?}", dir);
        router = router
            .route_service("/", ServeFile::new(dir.join(&config.index_file)))
            .fallback_service(ServeDir::new(dir));
    }

    let router = router
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http());

    let router = if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

async fn relay_command(
    State(state): State<AppState>,
    command: RelayCommand,
) -> Result<Json<CommandResponse>, RelayError> {
    let response = match command {
        RelayCommand::Init => {
            let removed = state.store.clear().await?;
            CommandResponse::Cleared {
                removed,
                session: state.store.session().id,
            }
        }
        RelayCommand::Update { frame, payload } => {
            let bytes = state.store.write(frame, &payload).await?;
            CommandResponse::Stored { frame, bytes }
        }
    };

    Ok(Json(response))
}

async fn list_frames(State(state): State<AppState>) -> Result<Json<FrameListResponse>, RelayError> {
    let frames = state.store.list().await?;

    Ok(Json(FrameListResponse {
        frames,
        latest: state.store.latest(),
    }))
}

/// Stored payloads are passed through untouched.
fn frame_response(frame: u64, payload: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::HeaderName::from_static("x-frame-number"), frame.to_string()),
        ],
        payload,
    )
        .into_response()
}

async fn latest_frame(State(state): State<AppState>) -> Result<Response, RelayError> {
    let (frame, payload) = state.store.read_latest().await?;
    Ok(frame_response(frame, payload))
}

async fn get_frame(
    State(state): State<AppState>,
    frame: Result<Path<u64>, PathRejection>,
) -> Result<Response, RelayError> {
    let Path(frame) = frame.map_err(|rejection| RelayError::InvalidField {
        field: "frame",
        reason: rejection.body_text(),
    })?;
    let payload = state.store.read(frame).await?;
    Ok(frame_response(frame, payload))
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, RelayError> {
    let frames = state.store.list().await?.len();
    let session = state.store.session();
    let now = Utc::now();

    Ok(Json(HealthResponse {
        status: "healthy",
        frames,
        latest: state.store.latest(),
        session: session.id,
        session_started_at: session.started_at,
        uptime_secs: (now - state.started_at).num_seconds(),
        timestamp: now,
    }))
}

pub async fn serve(state: AppState, config: &RelayConfig) -> Result<()> {
    let app = create_router(state, config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("Relay listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
