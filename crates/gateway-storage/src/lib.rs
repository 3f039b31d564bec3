//! Storage module for the FIX gateway.
//!
//! This module provides the in-memory stores backing the gateway: the order
//! store (dual-indexed order records), the execution state store (merged
//! per-order execution snapshots plus a bounded recency log of raw reports),
//! and the market data store. All state is process-memory-resident and reset
//! on restart; that is a deliberate simplification, not a durability claim.

use thiserror::Error;
use uuid::Uuid;

/// Order record storage.
pub mod orders;
/// Execution report state storage.
pub mod execution;
/// Market quote storage.
pub mod market;

pub use execution::ExecutionStateStore;
pub use market::MarketDataStore;
pub use orders::{InMemoryOrderStore, OrderStore};

/// Errors that can occur during store operations.
///
/// Stores never raise for data-quality problems; these variants cover
/// programmer-contract violations and invariant breaches only.
#[derive(Debug, Error)]
pub enum StoreError {
	/// An order with the same primary identifier already exists.
	#[error("Order already exists: {0}")]
	DuplicateOrder(Uuid),
	/// The requested record does not exist.
	#[error("Not found")]
	NotFound,
	/// A quote update would leave the ask below the bid.
	#[error("ask must be greater than or equal to bid")]
	CrossedQuote,
}
