//! Market data endpoints.

use crate::server::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use gateway_types::{ApiError, MarketQuote, MarketStatusResponse, SimulateQuoteRequest};

/// Handles GET /market/status requests.
pub async fn status(State(state): State<AppState>) -> Json<MarketStatusResponse> {
	Json(state.engine.market_service().status())
}

/// Handles GET /market/quotes requests.
pub async fn quotes(State(state): State<AppState>) -> Json<Vec<MarketQuote>> {
	Json(state.engine.market_service().quotes())
}

/// Handles GET /market/quotes/{symbol} requests.
pub async fn quote(
	Path(symbol): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<MarketQuote>, ApiError> {
	state
		.engine
		.market_service()
		.quote(&symbol)
		.map(Json)
		.map_err(ApiError::from)
}

/// Handles POST /market/quotes/simulate requests.
pub async fn simulate(
	State(state): State<AppState>,
	Json(request): Json<SimulateQuoteRequest>,
) -> Result<Json<MarketQuote>, ApiError> {
	state
		.engine
		.market_service()
		.simulate(request)
		.map(Json)
		.map_err(ApiError::from)
}
