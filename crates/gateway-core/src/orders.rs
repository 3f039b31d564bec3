//! Order creation and lookup service.
//!
//! Validates incoming order requests, normalizes them into order records,
//! attempts submission through the venue session, and stores the result.
//! Validation failures are reported to the immediate caller and never logged
//! as system faults.

use chrono::Utc;
use gateway_session::OrderSender;
use gateway_storage::OrderStore;
use gateway_types::{
	CreateOrderRequest, CreateOrderResponse, OrderRecord, OrderStatus, OrderTicket, OrderType,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while servicing order requests.
#[derive(Debug, Error)]
pub enum OrderError {
	/// The request failed validation; the message names the offending field.
	#[error("{0}")]
	Validation(String),
	/// A storage contract violation surfaced while persisting the order.
	#[error("Storage error: {0}")]
	Storage(String),
}

impl From<OrderError> for gateway_types::ApiError {
	fn from(err: OrderError) -> Self {
		match err {
			OrderError::Validation(message) => gateway_types::ApiError::BadRequest(message),
			OrderError::Storage(message) => gateway_types::ApiError::Internal(message),
		}
	}
}

/// Service behind the order endpoints.
pub struct OrderService {
	sender: OrderSender,
	orders: Arc<dyn OrderStore>,
}

impl OrderService {
	pub fn new(sender: OrderSender, orders: Arc<dyn OrderStore>) -> Self {
		Self { sender, orders }
	}

	/// Creates an order from a validated request and attempts submission.
	///
	/// The record is stored either way: status NEW when the submission path
	/// accepted it, REJECTED with the descriptive reason when the transport
	/// was not eligible. The venue's own acknowledgement arrives later as an
	/// execution report.
	pub async fn create_order(
		&self,
		request: CreateOrderRequest,
	) -> Result<CreateOrderResponse, OrderError> {
		validate(&request)?;

		let order_id = Uuid::new_v4();
		let cl_ord_id = order_id.simple().to_string();
		let price = match request.order_type {
			// Price is ignored for market orders even when provided.
			OrderType::Market => None,
			OrderType::Limit => request.price,
		};
		let ticket = OrderTicket {
			order_id,
			cl_ord_id: cl_ord_id.clone(),
			created_at: Utc::now(),
			symbol: request.symbol.trim().to_uppercase(),
			side: request.side,
			qty: request.qty,
			order_type: request.order_type,
			price,
			tif: request.tif,
		};

		let outcome = self.sender.send(&ticket).await;
		let status = if outcome.accepted {
			OrderStatus::New
		} else {
			OrderStatus::Rejected
		};
		tracing::info!(
			order_id = %order_id,
			symbol = %ticket.symbol,
			status = %status,
			"Order created"
		);

		let record = OrderRecord {
			order_id: ticket.order_id,
			cl_ord_id: ticket.cl_ord_id.clone(),
			created_at: ticket.created_at,
			symbol: ticket.symbol.clone(),
			side: ticket.side,
			qty: ticket.qty,
			order_type: ticket.order_type,
			price: ticket.price,
			tif: ticket.tif,
			status,
			message: Some(outcome.message),
		};
		self.orders
			.add(record.clone())
			.await
			.map_err(|err| OrderError::Storage(err.to_string()))?;

		Ok(CreateOrderResponse {
			order_id: record.order_id,
			cl_ord_id: record.cl_ord_id,
			status: record.status,
			message: record.message,
		})
	}

	/// Returns all known orders, most-recently-created first.
	pub async fn list_orders(&self) -> Vec<OrderRecord> {
		self.orders.list_recent().await
	}

	/// Looks up an order by its primary identifier.
	pub async fn get_order(&self, order_id: Uuid) -> Option<OrderRecord> {
		self.orders.find_by_order_id(order_id).await
	}
}

fn validate(request: &CreateOrderRequest) -> Result<(), OrderError> {
	if request.symbol.trim().is_empty() {
		return Err(OrderError::Validation("symbol is required".to_string()));
	}
	if request.qty == 0 {
		return Err(OrderError::Validation(
			"qty must be greater than 0".to_string(),
		));
	}
	if request.order_type == OrderType::Limit {
		match request.price {
			None => {
				return Err(OrderError::Validation(
					"price is required for LIMIT orders".to_string(),
				));
			}
			Some(price) if price <= Decimal::ZERO => {
				return Err(OrderError::Validation(
					"price must be greater than 0".to_string(),
				));
			}
			Some(_) => {}
		}
	}
	Ok(())
}
