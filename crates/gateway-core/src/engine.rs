//! Gateway engine that wires the services together.
//!
//! The engine owns the stores and services, connects the venue session's
//! delivery channel to the reconciliation service, and runs the inbound
//! report loop until shutdown.

use crate::market::MarketDataService;
use crate::orders::OrderService;
use crate::reconcile::ReconciliationService;
use gateway_config::Config;
use gateway_session::implementations::simulated::SimulatedTransportFactory;
use gateway_session::{OrderSender, SessionService, TransportFactory};
use gateway_storage::{ExecutionStateStore, InMemoryOrderStore, MarketDataStore, OrderStore};
use gateway_types::ExecutionReport;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("Configuration error: {0}")]
	Config(String),
	#[error("Service error: {0}")]
	Service(String),
}

/// Main gateway engine holding the wired services.
pub struct GatewayEngine {
	config: Config,
	executions: Arc<ExecutionStateStore>,
	session: Arc<SessionService>,
	order_service: Arc<OrderService>,
	market_service: Arc<MarketDataService>,
	reconciliation: Arc<ReconciliationService>,
	/// Inbound delivery channel, taken by the first `run` call.
	inbound: Mutex<Option<mpsc::UnboundedReceiver<ExecutionReport>>>,
}

impl std::fmt::Debug for GatewayEngine {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GatewayEngine").finish_non_exhaustive()
	}
}

impl GatewayEngine {
	/// Builds the engine and all services from configuration.
	pub fn new(config: Config) -> Result<Self, EngineError> {
		let (report_tx, report_rx) = mpsc::unbounded_channel();

		let factory = transport_factory(&config.session.transport)?;
		let session = Arc::new(SessionService::new(
			factory,
			config.session.clone(),
			report_tx,
		));

		let orders: Arc<dyn OrderStore> = Arc::new(InMemoryOrderStore::new());
		let executions = Arc::new(ExecutionStateStore::new());
		let market = Arc::new(MarketDataStore::new());

		let order_service = Arc::new(OrderService::new(
			OrderSender::new(Arc::clone(&session)),
			Arc::clone(&orders),
		));
		let market_service = Arc::new(MarketDataService::new(market));
		let reconciliation = Arc::new(ReconciliationService::new(
			Arc::clone(&executions),
			Arc::clone(&orders),
		));

		Ok(Self {
			config,
			executions,
			session,
			order_service,
			market_service,
			reconciliation,
			inbound: Mutex::new(Some(report_rx)),
		})
	}

	/// Main execution loop: folds inbound execution reports until shutdown.
	pub async fn run(&self) -> Result<(), EngineError> {
		let mut inbound = self
			.inbound
			.lock()
			.await
			.take()
			.ok_or_else(|| EngineError::Service("Engine is already running".to_string()))?;

		tracing::info!("Gateway engine started");
		loop {
			tokio::select! {
				Some(report) = inbound.recv() => {
					self.reconciliation.apply_execution_report(report).await;
				}
				_ = tokio::signal::ctrl_c() => {
					break;
				}
			}
		}

		self.session.stop().await;
		tracing::info!("Gateway engine stopped");
		Ok(())
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn session(&self) -> &Arc<SessionService> {
		&self.session
	}

	pub fn executions(&self) -> &Arc<ExecutionStateStore> {
		&self.executions
	}

	pub fn order_service(&self) -> &Arc<OrderService> {
		&self.order_service
	}

	pub fn market_service(&self) -> &Arc<MarketDataService> {
		&self.market_service
	}

	pub fn reconciliation(&self) -> &Arc<ReconciliationService> {
		&self.reconciliation
	}
}

fn transport_factory(name: &str) -> Result<Box<dyn TransportFactory>, EngineError> {
	match name {
		"simulated" => Ok(Box::new(SimulatedTransportFactory)),
		other => Err(EngineError::Config(format!(
			"Unknown transport implementation: {}",
			other
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use gateway_types::{
		CreateOrderRequest, OrderSide, OrderStatus, OrderType, TimeInForce,
	};
	use rust_decimal::Decimal;

	fn engine() -> GatewayEngine {
		GatewayEngine::new(Config::default()).unwrap()
	}

	#[tokio::test]
	async fn unknown_transport_name_is_a_configuration_error() {
		let mut config = Config::default();
		config.session.transport = "quickfix".to_string();
		let err = GatewayEngine::new(config).unwrap_err();
		assert!(matches!(err, EngineError::Config(_)));
	}

	#[tokio::test]
	async fn create_then_reconcile_reflects_updated_status() {
		let engine = engine();
		engine.session().start().await.unwrap();

		let created = engine
			.order_service()
			.create_order(CreateOrderRequest {
				symbol: "AAPL".to_string(),
				side: OrderSide::Buy,
				qty: 100,
				order_type: OrderType::Limit,
				price: Some("189.55".parse().unwrap()),
				tif: TimeInForce::Day,
			})
			.await
			.unwrap();
		assert_eq!(created.status, OrderStatus::New);

		engine
			.reconciliation()
			.apply_execution_report(ExecutionReport {
				cl_ord_id: None,
				order_id: Some(created.order_id.to_string()),
				exec_type: Some("1".to_string()),
				ord_status: Some("1".to_string()),
				cum_qty: Some(Decimal::from(25)),
				leaves_qty: Some(Decimal::from(75)),
				avg_px: None,
				last_px: None,
				last_qty: None,
				text: Some("partial fill".to_string()),
				updated_at: Utc::now(),
			})
			.await;

		let order = engine
			.order_service()
			.get_order(created.order_id)
			.await
			.unwrap();
		assert_eq!(order.status, OrderStatus::PartiallyFilled);
		assert_eq!(order.message.as_deref(), Some("partial fill"));

		let state = engine
			.executions()
			.latest_for(&created.order_id.to_string())
			.await
			.unwrap();
		assert_eq!(state.filled_qty, Some(Decimal::from(25)));
		assert_eq!(state.leaves_qty, Some(Decimal::from(75)));
	}

	#[tokio::test]
	async fn inbound_acknowledgements_flow_through_the_run_loop() {
		let engine = Arc::new(engine());
		let run_engine = Arc::clone(&engine);
		let run_task = tokio::spawn(async move { run_engine.run().await });

		engine.session().start().await.unwrap();
		let created = engine
			.order_service()
			.create_order(CreateOrderRequest {
				symbol: "MSFT".to_string(),
				side: OrderSide::Sell,
				qty: 20,
				order_type: OrderType::Market,
				price: None,
				tif: TimeInForce::Ioc,
			})
			.await
			.unwrap();

		// The simulated transport acknowledges asynchronously through the
		// delivery channel; poll until the reconciled message lands.
		let mut acknowledged = false;
		for _ in 0..50 {
			let order = engine
				.order_service()
				.get_order(created.order_id)
				.await
				.unwrap();
			if order.message.as_deref() == Some("Simulated acknowledgement") {
				acknowledged = true;
				break;
			}
			tokio::time::sleep(std::time::Duration::from_millis(20)).await;
		}
		assert!(acknowledged, "acknowledgement was not reconciled");

		run_task.abort();
	}

	#[tokio::test]
	async fn run_can_only_be_entered_once() {
		let engine = Arc::new(engine());
		let run_engine = Arc::clone(&engine);
		let run_task = tokio::spawn(async move { run_engine.run().await });
		// Give the first run a chance to claim the channel.
		tokio::time::sleep(std::time::Duration::from_millis(20)).await;

		let err = engine.run().await.unwrap_err();
		assert!(matches!(err, EngineError::Service(_)));
		run_task.abort();
	}
}
