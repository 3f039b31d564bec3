//! Market quote types for the FIX gateway.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest known quote for a symbol.
///
/// Fields are optional because quote updates are partial; the market store
/// merges them field-wise, keeping prior values for fields a new update does
/// not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuote {
	pub symbol: String,
	pub bid: Option<Decimal>,
	pub ask: Option<Decimal>,
	pub last: Option<Decimal>,
	pub updated_at: DateTime<Utc>,
	/// Origin of the latest update (e.g. "SIMULATED").
	pub source: String,
}
