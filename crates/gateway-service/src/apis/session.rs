//! Session control endpoints.
//!
//! All three endpoints answer with the current status snapshot. A failed
//! start is not an HTTP error: the snapshot carries the ERROR state and the
//! failure detail, and the caller decides whether to retry.

use crate::server::AppState;
use axum::extract::State;
use axum::response::Json;
use gateway_types::SessionSnapshot;

/// Handles GET /session/status requests.
pub async fn status(State(state): State<AppState>) -> Json<SessionSnapshot> {
	Json(state.engine.session().status().await)
}

/// Handles POST /session/start requests.
pub async fn start(State(state): State<AppState>) -> Json<SessionSnapshot> {
	if let Err(err) = state.engine.session().start().await {
		// The snapshot below exposes the error state and detail.
		tracing::warn!(error = %err, "Session start failed");
	}
	Json(state.engine.session().status().await)
}

/// Handles POST /session/stop requests.
pub async fn stop(State(state): State<AppState>) -> Json<SessionSnapshot> {
	state.engine.session().stop().await;
	Json(state.engine.session().status().await)
}
