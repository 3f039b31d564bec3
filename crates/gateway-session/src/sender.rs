//! Order submission gating.
//!
//! Orders may only be handed to the venue while the connection is RUNNING;
//! anything else is rejected with a descriptive reason instead of blocking.
//! A send fault after eligibility was established does not retract the
//! acceptance: the order has been recorded locally and the venue's own
//! response arrives as an execution report.

use crate::SessionService;
use gateway_types::{ConnectionState, OrderTicket, SendOutcome};
use std::sync::Arc;

/// Sends order tickets through the session service's transport.
pub struct OrderSender {
	session: Arc<SessionService>,
}

impl OrderSender {
	pub fn new(session: Arc<SessionService>) -> Self {
		Self { session }
	}

	/// Attempts to submit the ticket to the venue.
	pub async fn send(&self, ticket: &OrderTicket) -> SendOutcome {
		let status = self.session.status().await;
		if status.state != ConnectionState::Running {
			return SendOutcome {
				accepted: false,
				message: format!(
					"Order rejected: transport is not RUNNING (current status: {})",
					status.state
				),
			};
		}

		match self.session.dispatch(ticket).await {
			Ok(Some(session)) => SendOutcome {
				accepted: true,
				message: format!("Order accepted and sent to session {}", session),
			},
			Ok(None) => SendOutcome {
				accepted: true,
				message: "Order accepted; transport RUNNING but no active session was selected"
					.to_string(),
			},
			Err(err) => {
				tracing::warn!(error = %err, "Order send attempt failed after acceptance");
				SendOutcome {
					accepted: true,
					message: format!("Order accepted; send attempted but not confirmed: {}", err),
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::simulated::SimulatedTransportFactory;
	use chrono::Utc;
	use gateway_config::SessionConfig;
	use gateway_types::{OrderSide, OrderType, TimeInForce};
	use tokio::sync::mpsc;
	use uuid::Uuid;

	fn ticket() -> OrderTicket {
		let order_id = Uuid::new_v4();
		OrderTicket {
			order_id,
			cl_ord_id: order_id.to_string(),
			created_at: Utc::now(),
			symbol: "AAPL".to_string(),
			side: OrderSide::Buy,
			qty: 100,
			order_type: OrderType::Market,
			price: None,
			tif: TimeInForce::Day,
		}
	}

	#[tokio::test]
	async fn rejects_while_not_running() {
		let (tx, _rx) = mpsc::unbounded_channel();
		let session = Arc::new(SessionService::new(
			Box::new(SimulatedTransportFactory),
			SessionConfig::default(),
			tx,
		));
		let sender = OrderSender::new(Arc::clone(&session));

		let outcome = sender.send(&ticket()).await;
		assert!(!outcome.accepted);
		assert!(outcome.message.contains("not RUNNING"));
		assert!(outcome.message.contains("STOPPED"));
	}

	#[tokio::test]
	async fn accepts_and_names_the_session_while_running() {
		let (tx, _rx) = mpsc::unbounded_channel();
		let session = Arc::new(SessionService::new(
			Box::new(SimulatedTransportFactory),
			SessionConfig::default(),
			tx,
		));
		session.start().await.unwrap();
		let sender = OrderSender::new(Arc::clone(&session));

		let outcome = sender.send(&ticket()).await;
		assert!(outcome.accepted);
		assert!(outcome.message.contains("sent to session"));
	}
}
