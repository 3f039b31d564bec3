//! Health endpoint.

use axum::response::Json;
use chrono::Utc;
use gateway_types::HealthResponse;

/// Handles GET /health requests.
pub async fn health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "UP".to_string(),
		timestamp: Utc::now(),
	})
}
