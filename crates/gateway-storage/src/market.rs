//! Market data store for the FIX gateway.
//!
//! Latest-quote-per-symbol storage with the same field-wise merge rule the
//! execution state store uses: an update that omits bid, ask, or last keeps
//! the previously known value. A merge that would leave the ask below the
//! bid is rejected.

use crate::StoreError;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use gateway_types::MarketQuote;
use rust_decimal::Decimal;

/// Concurrent per-symbol quote store.
pub struct MarketDataStore {
	quotes_by_symbol: DashMap<String, MarketQuote>,
}

impl MarketDataStore {
	pub fn new() -> Self {
		Self {
			quotes_by_symbol: DashMap::new(),
		}
	}

	/// Merges a quote update into the stored quote for the symbol.
	///
	/// Returns the merged quote. Fails with [`StoreError::CrossedQuote`] if
	/// the merged result would be crossed; the stored quote is left untouched
	/// in that case.
	pub fn upsert(
		&self,
		symbol: &str,
		bid: Option<Decimal>,
		ask: Option<Decimal>,
		last: Option<Decimal>,
		updated_at: DateTime<Utc>,
		source: &str,
	) -> Result<MarketQuote, StoreError> {
		match self.quotes_by_symbol.entry(symbol.to_string()) {
			Entry::Occupied(mut occupied) => {
				let merged = merge(symbol, Some(occupied.get()), bid, ask, last, updated_at, source)?;
				occupied.insert(merged.clone());
				Ok(merged)
			}
			Entry::Vacant(vacant) => {
				let merged = merge(symbol, None, bid, ask, last, updated_at, source)?;
				vacant.insert(merged.clone());
				Ok(merged)
			}
		}
	}

	/// Returns the stored quote for the symbol, if any.
	pub fn find(&self, symbol: &str) -> Option<MarketQuote> {
		self.quotes_by_symbol
			.get(symbol)
			.map(|quote| quote.value().clone())
	}

	/// Returns all stored quotes, sorted by symbol.
	pub fn all(&self) -> Vec<MarketQuote> {
		let mut quotes: Vec<MarketQuote> = self
			.quotes_by_symbol
			.iter()
			.map(|entry| entry.value().clone())
			.collect();
		quotes.sort_by(|a, b| a.symbol.cmp(&b.symbol));
		quotes
	}

	/// Number of symbols with a stored quote.
	pub fn symbols_tracked(&self) -> usize {
		self.quotes_by_symbol.len()
	}

	/// Timestamp of the most recent update across all symbols.
	pub fn latest_update_at(&self) -> Option<DateTime<Utc>> {
		self.quotes_by_symbol
			.iter()
			.map(|entry| entry.value().updated_at)
			.max()
	}
}

impl Default for MarketDataStore {
	fn default() -> Self {
		Self::new()
	}
}

fn merge(
	symbol: &str,
	existing: Option<&MarketQuote>,
	bid: Option<Decimal>,
	ask: Option<Decimal>,
	last: Option<Decimal>,
	updated_at: DateTime<Utc>,
	source: &str,
) -> Result<MarketQuote, StoreError> {
	let next_bid = bid.or_else(|| existing.and_then(|q| q.bid));
	let next_ask = ask.or_else(|| existing.and_then(|q| q.ask));
	let next_last = last.or_else(|| existing.and_then(|q| q.last));
	if let (Some(bid), Some(ask)) = (next_bid, next_ask) {
		if ask < bid {
			return Err(StoreError::CrossedQuote);
		}
	}
	Ok(MarketQuote {
		symbol: symbol.to_string(),
		bid: next_bid,
		ask: next_ask,
		last: next_last,
		updated_at,
		source: source.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn px(value: &str) -> Decimal {
		value.parse().unwrap()
	}

	#[test]
	fn upsert_merges_field_wise() {
		let store = MarketDataStore::new();
		store
			.upsert("AAPL", Some(px("189.50")), Some(px("189.60")), None, Utc::now(), "FEED")
			.unwrap();
		let merged = store
			.upsert("AAPL", None, None, Some(px("189.55")), Utc::now(), "SIMULATED")
			.unwrap();

		assert_eq!(merged.bid, Some(px("189.50")));
		assert_eq!(merged.ask, Some(px("189.60")));
		assert_eq!(merged.last, Some(px("189.55")));
		assert_eq!(merged.source, "SIMULATED");
	}

	#[test]
	fn crossed_merge_is_rejected_and_leaves_quote_untouched() {
		let store = MarketDataStore::new();
		store
			.upsert("AAPL", Some(px("189.50")), Some(px("189.60")), None, Utc::now(), "FEED")
			.unwrap();

		let err = store
			.upsert("AAPL", Some(px("190.00")), None, None, Utc::now(), "FEED")
			.unwrap_err();
		assert!(matches!(err, StoreError::CrossedQuote));

		let stored = store.find("AAPL").unwrap();
		assert_eq!(stored.bid, Some(px("189.50")));
	}

	#[test]
	fn all_is_sorted_by_symbol() {
		let store = MarketDataStore::new();
		store
			.upsert("MSFT", Some(px("410")), None, None, Utc::now(), "FEED")
			.unwrap();
		store
			.upsert("AAPL", Some(px("189")), None, None, Utc::now(), "FEED")
			.unwrap();

		let symbols: Vec<String> = store.all().into_iter().map(|q| q.symbol).collect();
		assert_eq!(symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
		assert_eq!(store.symbols_tracked(), 2);
		assert!(store.latest_update_at().is_some());
	}

	#[test]
	fn unknown_symbol_is_none() {
		let store = MarketDataStore::new();
		assert!(store.find("AAPL").is_none());
		assert!(store.latest_update_at().is_none());
	}
}
