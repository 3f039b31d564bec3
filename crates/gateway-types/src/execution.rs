//! Execution report types for the FIX gateway.
//!
//! An execution report is an immutable inbound fact about an order's fill or
//! status progress. The gateway folds reports into a merged per-order
//! execution state; the two types here are the raw event and that merged
//! snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single raw execution report received from the venue (or simulated).
///
/// At least one of `cl_ord_id` and `order_id` identifies the order; a report
/// carrying neither has no identity and is dropped by the state store.
/// Quantity and price fields are optional because venues omit fields that did
/// not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
	/// Correlation identifier assigned by the submitting client.
	pub cl_ord_id: Option<String>,
	/// Order identifier assigned by the venue.
	pub order_id: Option<String>,
	/// Vendor execution-type code (e.g. "0", "F", "PARTIAL_FILL").
	pub exec_type: Option<String>,
	/// Vendor order-status code (e.g. "1", "FILLED").
	pub ord_status: Option<String>,
	/// Cumulative filled quantity.
	pub cum_qty: Option<Decimal>,
	/// Remaining (leaves) quantity.
	pub leaves_qty: Option<Decimal>,
	/// Average fill price.
	pub avg_px: Option<Decimal>,
	/// Price of the last fill.
	pub last_px: Option<Decimal>,
	/// Quantity of the last fill.
	pub last_qty: Option<Decimal>,
	/// Free-text note from the venue.
	pub text: Option<String>,
	/// Timestamp the report was received or generated.
	pub updated_at: DateTime<Utc>,
}

/// The merged, latest-known execution snapshot for an order.
///
/// Every non-`None` field reflects the most recently received report that set
/// that field; a field absent from a newer report keeps the previously known
/// value (merge-by-field, not replace-by-record).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionState {
	pub exec_type: Option<String>,
	pub ord_status: Option<String>,
	pub filled_qty: Option<Decimal>,
	pub leaves_qty: Option<Decimal>,
	pub avg_px: Option<Decimal>,
	pub last_px: Option<Decimal>,
	pub last_qty: Option<Decimal>,
	pub text: Option<String>,
	/// Timestamp of the report that last touched this state.
	pub updated_at: DateTime<Utc>,
}
