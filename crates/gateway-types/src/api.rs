//! API types for the FIX gateway HTTP API.
//!
//! This module defines the request and response types for the gateway's HTTP
//! endpoints, along with the structured error type that maps service failures
//! to HTTP status codes.

use crate::{OrderSide, OrderStatus, OrderType, TimeInForce};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Request body for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
	pub symbol: String,
	pub side: OrderSide,
	pub qty: u32,
	#[serde(rename = "type")]
	pub order_type: OrderType,
	/// Required for LIMIT orders; ignored for MARKET orders.
	pub price: Option<Decimal>,
	pub tif: TimeInForce,
}

/// Response body returned after an order has been created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
	pub order_id: Uuid,
	pub cl_ord_id: String,
	pub status: OrderStatus,
	pub message: Option<String>,
}

/// Request body for injecting a synthetic execution report.
///
/// Fields are optional so the service layer can report precise validation
/// failures; at least one of `order_id` and `cl_ord_id` must be present, and
/// both `exec_type` and `ord_status` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateExecutionReportRequest {
	pub order_id: Option<String>,
	pub cl_ord_id: Option<String>,
	pub exec_type: Option<String>,
	pub ord_status: Option<String>,
	pub last_qty: Option<Decimal>,
	pub last_px: Option<Decimal>,
	pub cum_qty: Option<Decimal>,
	pub leaves_qty: Option<Decimal>,
	pub avg_px: Option<Decimal>,
	pub text: Option<String>,
}

/// Request body for injecting a simulated market quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateQuoteRequest {
	pub symbol: Option<String>,
	pub bid: Option<Decimal>,
	pub ask: Option<Decimal>,
	pub last: Option<Decimal>,
}

/// Aggregate view of the market data store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatusResponse {
	pub symbols_tracked: usize,
	pub latest_update_at: Option<DateTime<Utc>>,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub timestamp: DateTime<Utc>,
}

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Human-readable description of the failure.
	pub message: String,
}

/// Structured API error type with HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
	/// Invalid request input (400).
	BadRequest(String),
	/// Requested entity does not exist (404).
	NotFound(String),
	/// Unexpected internal failure (500).
	Internal(String),
}

impl ApiError {
	/// The HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::BadRequest(_) => 400,
			ApiError::NotFound(_) => 404,
			ApiError::Internal(_) => 500,
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApiError::BadRequest(message) => write!(f, "Bad Request: {}", message),
			ApiError::NotFound(message) => write!(f, "Not Found: {}", message),
			ApiError::Internal(message) => write!(f, "Internal Server Error: {}", message),
		}
	}
}

impl std::error::Error for ApiError {}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = match self.status_code() {
			400 => StatusCode::BAD_REQUEST,
			404 => StatusCode::NOT_FOUND,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		};
		let message = match self {
			ApiError::BadRequest(message)
			| ApiError::NotFound(message)
			| ApiError::Internal(message) => message,
		};

		(status, Json(ErrorResponse { message })).into_response()
	}
}
