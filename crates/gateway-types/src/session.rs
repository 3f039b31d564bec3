//! Connection session types for the FIX gateway.
//!
//! The session service tracks the external transport's connection through a
//! small state machine; these types are its externally visible status
//! snapshot and diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the venue transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionState {
	/// Initial and terminal state; no transport is held.
	Stopped,
	/// A start attempt is in flight.
	Starting,
	/// The transport is established; order submission is eligible.
	Running,
	/// The last start attempt failed; detail carries the failure.
	Error,
}

impl fmt::Display for ConnectionState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConnectionState::Stopped => write!(f, "STOPPED"),
			ConnectionState::Starting => write!(f, "STARTING"),
			ConnectionState::Running => write!(f, "RUNNING"),
			ConnectionState::Error => write!(f, "ERROR"),
		}
	}
}

/// Diagnostics recorded on every session state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDiagnostics {
	/// Description of the last lifecycle event.
	pub last_event: String,
	/// Last error observed, if any.
	pub last_error: Option<String>,
	pub last_updated_at: DateTime<Utc>,
}

/// Immutable snapshot of the session service's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
	pub state: ConnectionState,
	/// Error detail when `state` is `Error`.
	pub detail: Option<String>,
	/// Identifiers of the active transport sessions.
	pub sessions: Vec<String>,
	pub diagnostics: SessionDiagnostics,
}

impl SessionSnapshot {
	/// The snapshot a freshly constructed session service reports.
	pub fn initial() -> Self {
		Self {
			state: ConnectionState::Stopped,
			detail: None,
			sessions: Vec::new(),
			diagnostics: SessionDiagnostics {
				last_event: "Not started".to_string(),
				last_error: None,
				last_updated_at: Utc::now(),
			},
		}
	}
}
