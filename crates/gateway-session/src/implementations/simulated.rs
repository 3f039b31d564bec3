//! Simulated in-process venue transport.
//!
//! Stands in for a real protocol engine during development and tests: it
//! connects instantly, exposes a single session named after the configured
//! comp ids, and acknowledges every submitted order with a NEW execution
//! report pushed through the delivery channel. The acknowledgement carries a
//! synthetic venue order id, so resolution exercises the same
//! correlation-id fallback a real venue id mismatch would.

use crate::{SessionError, Transport, TransportFactory};
use async_trait::async_trait;
use chrono::Utc;
use gateway_config::SessionConfig;
use gateway_types::{ExecutionReport, OrderTicket};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;

/// In-process transport that echoes acknowledgements for submitted orders.
pub struct SimulatedTransport {
	session_name: String,
	reports: mpsc::UnboundedSender<ExecutionReport>,
	connected: AtomicBool,
}

impl SimulatedTransport {
	pub fn new(config: &SessionConfig, reports: mpsc::UnboundedSender<ExecutionReport>) -> Self {
		Self {
			session_name: format!(
				"FIX.4.4:{}->{}",
				config.sender_comp_id, config.target_comp_id
			),
			reports,
			connected: AtomicBool::new(false),
		}
	}
}

#[async_trait]
impl Transport for SimulatedTransport {
	async fn start(&self) -> Result<(), SessionError> {
		self.connected.store(true, Ordering::SeqCst);
		tracing::debug!(session = %self.session_name, "Simulated transport connected");
		Ok(())
	}

	async fn stop(&self) {
		self.connected.store(false, Ordering::SeqCst);
	}

	fn sessions(&self) -> Vec<String> {
		if self.connected.load(Ordering::SeqCst) {
			vec![self.session_name.clone()]
		} else {
			Vec::new()
		}
	}

	async fn send_order(&self, ticket: &OrderTicket) -> Result<(), SessionError> {
		if !self.connected.load(Ordering::SeqCst) {
			return Err(SessionError::Transport(
				"simulated transport is not connected".to_string(),
			));
		}

		let ack = ExecutionReport {
			cl_ord_id: Some(ticket.cl_ord_id.clone()),
			order_id: Some(format!("SIM-{}", ticket.order_id)),
			exec_type: Some("0".to_string()),
			ord_status: Some("0".to_string()),
			cum_qty: Some(Decimal::ZERO),
			leaves_qty: Some(Decimal::from(ticket.qty)),
			avg_px: None,
			last_px: None,
			last_qty: None,
			text: Some("Simulated acknowledgement".to_string()),
			updated_at: Utc::now(),
		};
		if self.reports.send(ack).is_err() {
			tracing::debug!("Delivery channel closed; dropping simulated acknowledgement");
		}
		Ok(())
	}
}

/// Factory for the simulated transport.
pub struct SimulatedTransportFactory;

impl TransportFactory for SimulatedTransportFactory {
	fn create(
		&self,
		config: &SessionConfig,
		reports: mpsc::UnboundedSender<ExecutionReport>,
	) -> Result<Box<dyn Transport>, SessionError> {
		Ok(Box::new(SimulatedTransport::new(config, reports)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use gateway_types::{OrderSide, OrderType, TimeInForce};
	use uuid::Uuid;

	#[tokio::test]
	async fn acknowledges_submitted_orders_with_a_new_report() {
		let (tx, mut rx) = mpsc::unbounded_channel();
		let transport = SimulatedTransport::new(&SessionConfig::default(), tx);
		transport.start().await.unwrap();

		let order_id = Uuid::new_v4();
		let ticket = OrderTicket {
			order_id,
			cl_ord_id: order_id.to_string(),
			created_at: Utc::now(),
			symbol: "AAPL".to_string(),
			side: OrderSide::Buy,
			qty: 100,
			order_type: OrderType::Market,
			price: None,
			tif: TimeInForce::Day,
		};
		transport.send_order(&ticket).await.unwrap();

		let ack = rx.recv().await.unwrap();
		assert_eq!(ack.cl_ord_id.as_deref(), Some(ticket.cl_ord_id.as_str()));
		assert_eq!(ack.ord_status.as_deref(), Some("0"));
		assert_eq!(ack.leaves_qty, Some(Decimal::from(100)));
	}

	#[tokio::test]
	async fn send_fails_while_disconnected() {
		let (tx, _rx) = mpsc::unbounded_channel();
		let transport = SimulatedTransport::new(&SessionConfig::default(), tx);

		let order_id = Uuid::new_v4();
		let ticket = OrderTicket {
			order_id,
			cl_ord_id: order_id.to_string(),
			created_at: Utc::now(),
			symbol: "AAPL".to_string(),
			side: OrderSide::Sell,
			qty: 10,
			order_type: OrderType::Market,
			price: None,
			tif: TimeInForce::Ioc,
		};
		let err = transport.send_order(&ticket).await.unwrap_err();
		assert!(matches!(err, SessionError::Transport(_)));
	}

	#[tokio::test]
	async fn sessions_follow_connection_state() {
		let (tx, _rx) = mpsc::unbounded_channel();
		let transport = SimulatedTransport::new(&SessionConfig::default(), tx);
		assert!(transport.sessions().is_empty());

		transport.start().await.unwrap();
		assert_eq!(transport.sessions(), vec!["FIX.4.4:GATEWAY->VENUE".to_string()]);

		transport.stop().await;
		assert!(transport.sessions().is_empty());
	}
}
