//! Execution report reconciliation.
//!
//! Folds inbound execution reports into the gateway's view: the execution
//! state store is always updated first as the durable record of what was
//! heard, then the target order is resolved and its status and message are
//! brought up to date. The upstream stream is not guaranteed to be
//! well-formed or order-complete, so every data-quality problem degrades to a
//! partial no-op instead of an error.

use crate::status_map::map_status;
use gateway_storage::{ExecutionStateStore, OrderStore};
use gateway_types::{ExecutionReport, OrderRecord};
use std::sync::Arc;
use uuid::Uuid;

/// Applies execution reports to the execution state store and order store.
pub struct ReconciliationService {
	state_store: Arc<ExecutionStateStore>,
	orders: Arc<dyn OrderStore>,
}

impl ReconciliationService {
	pub fn new(state_store: Arc<ExecutionStateStore>, orders: Arc<dyn OrderStore>) -> Self {
		Self {
			state_store,
			orders,
		}
	}

	/// Folds one execution report into the gateway state.
	///
	/// Side-effect-only and infallible by contract: an unmatched order, an
	/// unmappable status, or a malformed identifier each degrade to skipping
	/// that sub-step, never to an error.
	pub async fn apply_execution_report(&self, event: ExecutionReport) {
		self.state_store.update(event.clone()).await;

		let Some(order) = self.resolve_order(&event).await else {
			tracing::debug!(
				cl_ord_id = event.cl_ord_id.as_deref().unwrap_or(""),
				order_id = event.order_id.as_deref().unwrap_or(""),
				"Execution report did not match a known order"
			);
			return;
		};

		let mapped = map_status(event.exec_type.as_deref(), event.ord_status.as_deref());
		if mapped.is_none() && event.text.is_none() {
			// Nothing new to record on the order.
			return;
		}

		let status = mapped.unwrap_or(order.status);
		let message = event.text.clone().or_else(|| order.message.clone());
		let updated = OrderRecord {
			status,
			message,
			..order
		};
		if let Err(err) = self.orders.update(updated).await {
			tracing::debug!(error = %err, "Order update skipped during reconciliation");
		}
	}

	/// Resolves the order an event refers to.
	///
	/// The venue order id is tried first as a primary-identifier lookup, but
	/// only when it parses as one; a non-identifier-shaped value falls
	/// through to the correlation-id lookup rather than failing.
	async fn resolve_order(&self, event: &ExecutionReport) -> Option<OrderRecord> {
		if let Some(raw) = non_blank(&event.order_id) {
			if let Ok(order_id) = Uuid::parse_str(raw) {
				if let Some(order) = self.orders.find_by_order_id(order_id).await {
					return Some(order);
				}
			}
		}
		let cl_ord_id = non_blank(&event.cl_ord_id)?;
		self.orders.find_by_cl_ord_id(cl_ord_id).await
	}
}

fn non_blank(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.trim().is_empty())
}
