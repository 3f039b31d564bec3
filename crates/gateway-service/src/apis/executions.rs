//! Execution report endpoints.
//!
//! The simulate endpoint feeds a synthetic report through the same
//! reconciliation path inbound venue reports take, so it exercises the full
//! fold: state store first, then order resolution and mutation.

use crate::server::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use chrono::Utc;
use gateway_types::{ApiError, ExecutionReport, ExecutionState, SimulateExecutionReportRequest};

/// Handles GET /exec-reports requests.
pub async fn list_execution_reports(State(state): State<AppState>) -> Json<Vec<ExecutionReport>> {
	Json(state.engine.executions().recent_reports().await)
}

/// Handles GET /exec-state/{key} requests.
///
/// The key may be either the correlation id or the venue order id; both
/// resolve to the same merged state.
pub async fn latest_execution_state(
	Path(key): Path<String>,
	State(state): State<AppState>,
) -> Result<Json<ExecutionState>, ApiError> {
	state
		.engine
		.executions()
		.latest_for(&key)
		.await
		.map(Json)
		.ok_or_else(|| ApiError::NotFound(format!("No execution state for key: {}", key)))
}

/// Handles POST /exec-reports/simulate requests.
pub async fn simulate_execution_report(
	State(state): State<AppState>,
	Json(request): Json<SimulateExecutionReportRequest>,
) -> Result<Json<ExecutionReport>, ApiError> {
	validate(&request)?;

	let event = ExecutionReport {
		cl_ord_id: request.cl_ord_id,
		order_id: request.order_id,
		exec_type: request.exec_type,
		ord_status: request.ord_status,
		cum_qty: request.cum_qty,
		leaves_qty: request.leaves_qty,
		avg_px: request.avg_px,
		last_px: request.last_px,
		last_qty: request.last_qty,
		text: request.text,
		updated_at: Utc::now(),
	};
	state
		.engine
		.reconciliation()
		.apply_execution_report(event.clone())
		.await;
	Ok(Json(event))
}

fn validate(request: &SimulateExecutionReportRequest) -> Result<(), ApiError> {
	let missing_order_id = is_blank(&request.order_id);
	let missing_cl_ord_id = is_blank(&request.cl_ord_id);
	if missing_order_id && missing_cl_ord_id {
		return Err(ApiError::BadRequest(
			"Either orderId or clOrdId is required".to_string(),
		));
	}
	if is_blank(&request.exec_type) {
		return Err(ApiError::BadRequest("execType is required".to_string()));
	}
	if is_blank(&request.ord_status) {
		return Err(ApiError::BadRequest("ordStatus is required".to_string()));
	}
	Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
	value.as_deref().is_none_or(|v| v.trim().is_empty())
}
