//! REST API handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use lbwatch_core::{LbwatchError, StatusSnapshot};
use lbwatch_monitor::StatusMonitor;
use lbwatch_stats::StatsSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Application state shared across handlers
pub struct AppState<S: StatsSource> {
    pub monitor: StatusMonitor<S>,
}

/// Create the API router
pub fn create_router<S: StatsSource + 'static>(monitor: StatusMonitor<S>) -> Router {
    let state = Arc::new(AppState { monitor });

    Router::new()
        .route("/api/v1/status", get(get_status::<S>))
        .route("/api/v1/health", get(get_health))
        .with_state(state)
}

/// Error body returned for failed polls.
///
/// `kind` lets consumers distinguish "upstream unavailable" from
/// "upstream returned unusable data" without parsing message text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

/// Build one fresh snapshot and return it
async fn get_status<S: StatsSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<StatusSnapshot>, (StatusCode, Json<ErrorBody>)> {
    match state.monitor.build_snapshot().await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Failed to build status snapshot");
            Err((
                status_code_for(&e),
                Json(ErrorBody {
                    error: e.to_string(),
                    kind: e.kind().to_string(),
                }),
            ))
        }
    }
}

fn status_code_for(err: &LbwatchError) -> StatusCode {
    match err {
        LbwatchError::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        LbwatchError::SourceError(_) | LbwatchError::MalformedInput(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub version: String,
}

/// Report daemon liveness (does not touch the stats socket)
async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
