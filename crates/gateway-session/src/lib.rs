//! Venue session module for the FIX gateway.
//!
//! This module owns the connection lifecycle of the external venue transport.
//! The wire protocol itself (framing, sequencing, session handshake) is
//! delegated to a transport implementation behind the [`Transport`] trait;
//! this layer tracks the connection state machine, serializes start/stop, and
//! gates order submission on the connection being RUNNING.

use async_trait::async_trait;
use chrono::Utc;
use gateway_config::SessionConfig;
use gateway_types::{ConnectionState, ExecutionReport, OrderTicket, SessionSnapshot};
use thiserror::Error;
use tokio::sync::{mpsc, Mutex, RwLock};

/// Re-export implementations
pub mod implementations {
	pub mod simulated;
}

mod sender;

pub use sender::OrderSender;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
	/// The transport could not be established.
	#[error("Failed to start transport: {0}")]
	StartFailed(String),
	/// A fault inside an established transport.
	#[error("Transport fault: {0}")]
	Transport(String),
}

/// Trait defining the interface for venue transports.
///
/// A transport is created cold by a [`TransportFactory`] and established by
/// [`Transport::start`]. Inbound execution reports are pushed into the
/// delivery channel handed to the factory; this layer never polls.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Establishes the connection to the venue.
	///
	/// May block briefly while the underlying resource is acquired. Bounding
	/// a stuck connect attempt is the transport's responsibility.
	async fn start(&self) -> Result<(), SessionError>;

	/// Releases the connection. Must be safe to call on a never-started or
	/// already-stopped transport.
	async fn stop(&self);

	/// Identifiers of the active sessions on this transport.
	fn sessions(&self) -> Vec<String>;

	/// Submits an order to the venue.
	async fn send_order(&self, ticket: &OrderTicket) -> Result<(), SessionError>;
}

/// Factory creating cold transports from session configuration.
///
/// The delivery sender is cloned into every created transport; reports the
/// venue pushes back flow through it to the reconciliation loop.
pub trait TransportFactory: Send + Sync {
	fn create(
		&self,
		config: &SessionConfig,
		reports: mpsc::UnboundedSender<ExecutionReport>,
	) -> Result<Box<dyn Transport>, SessionError>;
}

/// Connection lifecycle controller for the venue transport.
///
/// Tracks the single process-wide connection status and owns the live
/// transport handle. `start` and `stop` serialize on one mutex so the
/// transport is never double-acquired or double-released; status readers
/// never take that mutex.
pub struct SessionService {
	factory: Box<dyn TransportFactory>,
	config: SessionConfig,
	reports: mpsc::UnboundedSender<ExecutionReport>,
	status: RwLock<SessionSnapshot>,
	transport: Mutex<Option<Box<dyn Transport>>>,
}

impl SessionService {
	pub fn new(
		factory: Box<dyn TransportFactory>,
		config: SessionConfig,
		reports: mpsc::UnboundedSender<ExecutionReport>,
	) -> Self {
		Self {
			factory,
			config,
			reports,
			status: RwLock::new(SessionSnapshot::initial()),
			transport: Mutex::new(None),
		}
	}

	/// Starts the venue transport.
	///
	/// No-op while already RUNNING or STARTING. On failure the service ends
	/// in ERROR with the failure detail recorded, any partial transport is
	/// released, and the error is returned to the caller; a later `start` is
	/// a fresh attempt. Retry policy belongs to the caller.
	pub async fn start(&self) -> Result<(), SessionError> {
		let mut slot = self.transport.lock().await;

		{
			let status = self.status.read().await;
			if matches!(
				status.state,
				ConnectionState::Running | ConnectionState::Starting
			) {
				return Ok(());
			}
		}

		self.set_status(|status| {
			status.state = ConnectionState::Starting;
			status.detail = None;
			status.diagnostics.last_event = "Start requested".to_string();
			status.diagnostics.last_error = None;
		})
		.await;

		let started = match self.factory.create(&self.config, self.reports.clone()) {
			Ok(transport) => match transport.start().await {
				Ok(()) => Ok(transport),
				Err(err) => Err(err),
			},
			Err(err) => Err(err),
		};

		match started {
			Ok(transport) => {
				let sessions = transport.sessions();
				tracing::info!(sessions = ?sessions, "Venue transport started");
				*slot = Some(transport);
				self.set_status(|status| {
					status.state = ConnectionState::Running;
					status.detail = None;
					status.sessions = sessions;
					status.diagnostics.last_event = "Transport started".to_string();
					status.diagnostics.last_error = None;
				})
				.await;
				Ok(())
			}
			Err(err) => {
				let detail = err.to_string();
				tracing::warn!(error = %detail, "Venue transport start failed");
				*slot = None;
				self.set_status(|status| {
					status.state = ConnectionState::Error;
					status.detail = Some(detail.clone());
					status.diagnostics.last_event = "Start failed".to_string();
					status.diagnostics.last_error = Some(detail.clone());
				})
				.await;
				Err(SessionError::StartFailed(detail))
			}
		}
	}

	/// Stops the venue transport.
	///
	/// Idempotent; releases a held transport and unconditionally transitions
	/// to STOPPED regardless of the prior state, including ERROR.
	pub async fn stop(&self) {
		let mut slot = self.transport.lock().await;
		if let Some(transport) = slot.take() {
			transport.stop().await;
			tracing::info!("Venue transport stopped");
		}
		self.set_status(|status| {
			status.state = ConnectionState::Stopped;
			status.detail = None;
			status.diagnostics.last_event = "Transport stopped".to_string();
			status.diagnostics.last_error = None;
		})
		.await;
	}

	/// Returns the current status snapshot without waiting on an in-flight
	/// start or stop.
	pub async fn status(&self) -> SessionSnapshot {
		self.status.read().await.clone()
	}

	/// Hands an order ticket to the held transport, returning the session it
	/// was sent on, or `None` when no transport is held.
	pub(crate) async fn dispatch(
		&self,
		ticket: &OrderTicket,
	) -> Result<Option<String>, SessionError> {
		let slot = self.transport.lock().await;
		match slot.as_ref() {
			Some(transport) => {
				transport.send_order(ticket).await?;
				Ok(transport.sessions().into_iter().next())
			}
			None => Ok(None),
		}
	}

	async fn set_status<F>(&self, update: F)
	where
		F: FnOnce(&mut SessionSnapshot),
	{
		let mut status = self.status.write().await;
		update(&mut status);
		status.diagnostics.last_updated_at = Utc::now();
	}
}
