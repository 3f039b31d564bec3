//! Execution state store for the FIX gateway.
//!
//! Holds the merged, latest-known execution snapshot per order, addressable
//! by either of the order's identifiers, plus a bounded most-recent-first log
//! of the raw reports as received. Merging is field-wise: a report that omits
//! a field never erases a previously known value.

use gateway_types::{ExecutionReport, ExecutionState};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maximum number of raw reports retained in the recency log.
const MAX_RECENT: usize = 200;

struct Inner {
	latest_by_order_key: HashMap<String, Arc<ExecutionState>>,
	recent_reports: VecDeque<ExecutionReport>,
}

/// Concurrent, dual-keyed store of merged execution state.
///
/// Writers are serialized through a single write lock so no concurrent merge
/// is lost; readers never block other readers.
pub struct ExecutionStateStore {
	inner: RwLock<Inner>,
}

impl ExecutionStateStore {
	pub fn new() -> Self {
		Self {
			inner: RwLock::new(Inner {
				latest_by_order_key: HashMap::new(),
				recent_reports: VecDeque::new(),
			}),
		}
	}

	/// Folds a report into the store.
	///
	/// The report's non-blank identifiers form its key set; a report with no
	/// identifiers carries no identity and is dropped without error. The
	/// merged state is stored under every key in the set so lookups by either
	/// identifier observe identical state.
	pub async fn update(&self, event: ExecutionReport) {
		let keys = Self::keys(&event);
		if keys.is_empty() {
			tracing::debug!("Dropping execution report without identifiers");
			return;
		}

		let mut inner = self.inner.write().await;
		let current = inner.latest_by_order_key.get(&keys[0]).cloned();
		let merged = Arc::new(Self::merge(current.as_deref(), &event));
		for key in &keys {
			inner
				.latest_by_order_key
				.insert(key.clone(), Arc::clone(&merged));
		}

		inner.recent_reports.push_front(event);
		while inner.recent_reports.len() > MAX_RECENT {
			inner.recent_reports.pop_back();
		}
	}

	/// Returns the merged state stored under the given key, if any.
	pub async fn latest_for(&self, order_key: &str) -> Option<ExecutionState> {
		let inner = self.inner.read().await;
		inner
			.latest_by_order_key
			.get(order_key)
			.map(|state| state.as_ref().clone())
	}

	/// Returns a snapshot of the recency log, most recent first.
	pub async fn recent_reports(&self) -> Vec<ExecutionReport> {
		let inner = self.inner.read().await;
		inner.recent_reports.iter().cloned().collect()
	}

	fn merge(current: Option<&ExecutionState>, event: &ExecutionReport) -> ExecutionState {
		ExecutionState {
			exec_type: prefer(&event.exec_type, current.and_then(|c| c.exec_type.clone())),
			ord_status: prefer(&event.ord_status, current.and_then(|c| c.ord_status.clone())),
			filled_qty: event.cum_qty.or_else(|| current.and_then(|c| c.filled_qty)),
			leaves_qty: event.leaves_qty.or_else(|| current.and_then(|c| c.leaves_qty)),
			avg_px: event.avg_px.or_else(|| current.and_then(|c| c.avg_px)),
			last_px: event.last_px.or_else(|| current.and_then(|c| c.last_px)),
			last_qty: event.last_qty.or_else(|| current.and_then(|c| c.last_qty)),
			text: prefer(&event.text, current.and_then(|c| c.text.clone())),
			updated_at: event.updated_at,
		}
	}

	fn keys(event: &ExecutionReport) -> Vec<String> {
		let mut keys = Vec::new();
		if let Some(cl_ord_id) = non_blank(&event.cl_ord_id) {
			keys.push(cl_ord_id.to_string());
		}
		if let Some(order_id) = non_blank(&event.order_id) {
			if !keys.iter().any(|key| key == order_id) {
				keys.push(order_id.to_string());
			}
		}
		keys
	}
}

impl Default for ExecutionStateStore {
	fn default() -> Self {
		Self::new()
	}
}

fn prefer(preferred: &Option<String>, fallback: Option<String>) -> Option<String> {
	preferred.clone().or(fallback)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.trim().is_empty())
}
