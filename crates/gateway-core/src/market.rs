//! Market data service.
//!
//! Thin validation and normalization layer over the market data store:
//! symbols are uppercased and shape-checked, quote updates must carry at
//! least one price field, and a merge that would cross the book is rejected
//! back to the caller.

use chrono::Utc;
use gateway_storage::MarketDataStore;
use gateway_types::{MarketQuote, MarketStatusResponse, SimulateQuoteRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

/// Source tag recorded on simulated quote updates.
const SIMULATED_SOURCE: &str = "SIMULATED";

static SYMBOL_PATTERN: Lazy<Regex> = Lazy::new(|| {
	Regex::new("^[A-Z0-9._-]{1,24}$").expect("symbol pattern is valid")
});

/// Errors that can occur while servicing market data requests.
#[derive(Debug, Error)]
pub enum QuoteError {
	#[error("{0}")]
	Validation(String),
	#[error("Unknown symbol: {0}")]
	UnknownSymbol(String),
}

impl From<QuoteError> for gateway_types::ApiError {
	fn from(err: QuoteError) -> Self {
		match err {
			QuoteError::Validation(message) => gateway_types::ApiError::BadRequest(message),
			QuoteError::UnknownSymbol(_) => gateway_types::ApiError::NotFound(err.to_string()),
		}
	}
}

/// Service behind the market data endpoints.
pub struct MarketDataService {
	store: Arc<MarketDataStore>,
}

impl MarketDataService {
	pub fn new(store: Arc<MarketDataStore>) -> Self {
		Self { store }
	}

	/// Aggregate store status for the market status endpoint.
	pub fn status(&self) -> MarketStatusResponse {
		MarketStatusResponse {
			symbols_tracked: self.store.symbols_tracked(),
			latest_update_at: self.store.latest_update_at(),
		}
	}

	/// Returns the quote for a symbol.
	pub fn quote(&self, symbol: &str) -> Result<MarketQuote, QuoteError> {
		let symbol = normalize_symbol(symbol)?;
		self.store
			.find(&symbol)
			.ok_or(QuoteError::UnknownSymbol(symbol))
	}

	/// Returns all quotes, sorted by symbol.
	pub fn quotes(&self) -> Vec<MarketQuote> {
		self.store.all()
	}

	/// Applies a simulated quote update.
	pub fn simulate(&self, request: SimulateQuoteRequest) -> Result<MarketQuote, QuoteError> {
		let symbol = normalize_symbol(request.symbol.as_deref().unwrap_or(""))?;
		if request.bid.is_none() && request.ask.is_none() && request.last.is_none() {
			return Err(QuoteError::Validation(
				"At least one of bid, ask, or last must be provided".to_string(),
			));
		}
		validate_non_negative("bid", request.bid)?;
		validate_non_negative("ask", request.ask)?;
		validate_non_negative("last", request.last)?;

		self.store
			.upsert(
				&symbol,
				request.bid,
				request.ask,
				request.last,
				Utc::now(),
				SIMULATED_SOURCE,
			)
			.map_err(|err| QuoteError::Validation(err.to_string()))
	}
}

fn normalize_symbol(symbol: &str) -> Result<String, QuoteError> {
	let normalized = symbol.trim().to_uppercase();
	if normalized.is_empty() {
		return Err(QuoteError::Validation("symbol is required".to_string()));
	}
	if !SYMBOL_PATTERN.is_match(&normalized) {
		return Err(QuoteError::Validation(
			"symbol has invalid format".to_string(),
		));
	}
	Ok(normalized)
}

fn validate_non_negative(field: &str, value: Option<Decimal>) -> Result<(), QuoteError> {
	match value {
		Some(v) if v < Decimal::ZERO => Err(QuoteError::Validation(format!(
			"{} must be non-negative",
			field
		))),
		_ => Ok(()),
	}
}
