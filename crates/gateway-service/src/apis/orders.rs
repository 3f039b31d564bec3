//! Order endpoints.

use crate::server::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use gateway_types::{ApiError, CreateOrderRequest, CreateOrderResponse, OrderRecord};
use uuid::Uuid;

/// Handles POST /orders requests.
pub async fn create_order(
	State(state): State<AppState>,
	Json(request): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
	match state.engine.order_service().create_order(request).await {
		Ok(response) => Ok(Json(response)),
		Err(err) => {
			tracing::debug!(error = %err, "Order creation rejected");
			Err(ApiError::from(err))
		}
	}
}

/// Handles GET /orders requests.
pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<OrderRecord>> {
	Json(state.engine.order_service().list_orders().await)
}

/// Handles GET /orders/{id} requests.
pub async fn get_order(
	Path(id): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<OrderRecord>, ApiError> {
	let order_id = Uuid::parse_str(&id)
		.map_err(|_| ApiError::BadRequest(format!("Invalid order id: {}", id)))?;
	state
		.engine
		.order_service()
		.get_order(order_id)
		.await
		.map(Json)
		.ok_or_else(|| ApiError::NotFound(format!("Order not found: {}", id)))
}
