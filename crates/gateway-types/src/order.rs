//! Order types for the FIX gateway.
//!
//! This module defines the order record stored by the gateway, the ticket
//! handed to the venue transport on submission, and the enumerations that
//! describe an order's side, type, time-in-force, and lifecycle status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
	Buy,
	Sell,
}

/// Order type. Limit orders carry a price; market orders never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
	Market,
	Limit,
}

/// Time-in-force of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
	Day,
	Ioc,
	Fok,
	Gtc,
}

/// Canonical order status derived from venue execution reports.
///
/// This is the gateway's own normalized enumeration; vendor-specific codes are
/// translated into it by the status mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
	/// Order has been created and accepted by the submission path.
	New,
	/// Order is partially filled; leaves quantity remains.
	PartiallyFilled,
	/// Order is completely filled.
	Filled,
	/// Order has been canceled at the venue.
	Canceled,
	/// Order was rejected, either locally or by the venue.
	Rejected,
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::New => write!(f, "NEW"),
			OrderStatus::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
			OrderStatus::Filled => write!(f, "FILLED"),
			OrderStatus::Canceled => write!(f, "CANCELED"),
			OrderStatus::Rejected => write!(f, "REJECTED"),
		}
	}
}

/// Represents one order submitted by a client.
///
/// An order is created once by the order service and afterwards mutated only
/// by execution-report application (status and message); it is never deleted
/// during the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
	/// Globally unique primary identifier, assigned at creation. Immutable.
	pub order_id: Uuid,
	/// Correlation identifier the venue uses to reference this order in
	/// execution reports. Assigned at creation, immutable.
	pub cl_ord_id: String,
	/// Timestamp when the order was created.
	pub created_at: DateTime<Utc>,
	/// Instrument symbol, normalized to uppercase.
	pub symbol: String,
	pub side: OrderSide,
	/// Order quantity; always positive.
	pub qty: u32,
	#[serde(rename = "type")]
	pub order_type: OrderType,
	/// Limit price. Present if and only if `order_type` is `Limit`.
	pub price: Option<Decimal>,
	pub tif: TimeInForce,
	/// Current canonical status.
	pub status: OrderStatus,
	/// Last human-readable status message, if any.
	pub message: Option<String>,
}

/// An order as handed to the venue transport for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTicket {
	pub order_id: Uuid,
	pub cl_ord_id: String,
	pub created_at: DateTime<Utc>,
	pub symbol: String,
	pub side: OrderSide,
	pub qty: u32,
	#[serde(rename = "type")]
	pub order_type: OrderType,
	pub price: Option<Decimal>,
	pub tif: TimeInForce,
}

/// Result of attempting to send an order to the venue.
///
/// `accepted` reflects submission eligibility, not venue acknowledgement; the
/// venue's own response arrives later as an execution report.
#[derive(Debug, Clone)]
pub struct SendOutcome {
	pub accepted: bool,
	pub message: String,
}
