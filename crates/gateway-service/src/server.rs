//! HTTP server for the FIX gateway API.
//!
//! Builds the router over the gateway engine and serves it. Handlers return
//! immutable snapshots only; internal storage handles never cross this
//! boundary.

use crate::apis;
use axum::{
	routing::{get, post},
	Router,
};
use gateway_config::ApiConfig;
use gateway_core::GatewayEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the gateway engine for processing requests.
	pub engine: Arc<GatewayEngine>,
}

/// Builds the gateway API router.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(apis::health::health))
		.route(
			"/orders",
			post(apis::orders::create_order).get(apis::orders::list_orders),
		)
		.route("/orders/{id}", get(apis::orders::get_order))
		.route(
			"/exec-reports",
			get(apis::executions::list_execution_reports),
		)
		.route(
			"/exec-reports/simulate",
			post(apis::executions::simulate_execution_report),
		)
		.route(
			"/exec-state/{key}",
			get(apis::executions::latest_execution_state),
		)
		.route("/session/status", get(apis::session::status))
		.route("/session/start", post(apis::session::start))
		.route("/session/stop", post(apis::session::stop))
		.route("/market/status", get(apis::market::status))
		.route("/market/quotes", get(apis::market::quotes))
		.route("/market/quotes/simulate", post(apis::market::simulate))
		.route("/market/quotes/{symbol}", get(apis::market::quote))
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(state)
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	api_config: ApiConfig,
	engine: Arc<GatewayEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(AppState { engine });

	let bind_address = format!("{}:{}", api_config.host, api_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Gateway API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}
