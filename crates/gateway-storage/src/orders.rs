//! Order store for the FIX gateway.
//!
//! Order records are indexed twice: by the primary order identifier and by
//! the correlation identifier the venue echoes back in execution reports.
//! The two indexes exist because inbound reports may reference an order by
//! either scheme; lookups are by key, never by embedded reference.

use crate::StoreError;
use async_trait::async_trait;
use gateway_types::OrderRecord;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Trait defining the interface for order record storage.
///
/// Implementations must serialize `add`/`update` against each other; reads
/// must never block other reads. Records are immutable value objects, so
/// `update` stores a new version under the same primary identifier.
#[async_trait]
pub trait OrderStore: Send + Sync {
	/// Inserts a new order, indexing it by both identifiers.
	///
	/// Fails with [`StoreError::DuplicateOrder`] if the primary identifier is
	/// already present.
	async fn add(&self, order: OrderRecord) -> Result<(), StoreError>;

	/// Replaces the stored record for the order's primary identifier.
	///
	/// The correlation-id index is not touched; the correlation identifier is
	/// immutable after creation.
	async fn update(&self, order: OrderRecord) -> Result<(), StoreError>;

	/// Looks up an order by its primary identifier.
	async fn find_by_order_id(&self, order_id: Uuid) -> Option<OrderRecord>;

	/// Looks up an order by its correlation identifier.
	async fn find_by_cl_ord_id(&self, cl_ord_id: &str) -> Option<OrderRecord>;

	/// Returns all known orders, most-recently-created first.
	async fn list_recent(&self) -> Vec<OrderRecord>;
}

struct Inner {
	by_order_id: HashMap<Uuid, OrderRecord>,
	cl_ord_id_to_order_id: HashMap<String, Uuid>,
	/// Insertion order, newest first.
	sequence: VecDeque<Uuid>,
}

/// In-memory [`OrderStore`] implementation.
pub struct InMemoryOrderStore {
	inner: RwLock<Inner>,
}

impl InMemoryOrderStore {
	pub fn new() -> Self {
		Self {
			inner: RwLock::new(Inner {
				by_order_id: HashMap::new(),
				cl_ord_id_to_order_id: HashMap::new(),
				sequence: VecDeque::new(),
			}),
		}
	}
}

impl Default for InMemoryOrderStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
	async fn add(&self, order: OrderRecord) -> Result<(), StoreError> {
		let mut inner = self.inner.write().await;
		if inner.by_order_id.contains_key(&order.order_id) {
			return Err(StoreError::DuplicateOrder(order.order_id));
		}
		inner
			.cl_ord_id_to_order_id
			.insert(order.cl_ord_id.clone(), order.order_id);
		inner.sequence.push_front(order.order_id);
		inner.by_order_id.insert(order.order_id, order);
		Ok(())
	}

	async fn update(&self, order: OrderRecord) -> Result<(), StoreError> {
		let mut inner = self.inner.write().await;
		if !inner.by_order_id.contains_key(&order.order_id) {
			return Err(StoreError::NotFound);
		}
		inner.by_order_id.insert(order.order_id, order);
		Ok(())
	}

	async fn find_by_order_id(&self, order_id: Uuid) -> Option<OrderRecord> {
		let inner = self.inner.read().await;
		inner.by_order_id.get(&order_id).cloned()
	}

	async fn find_by_cl_ord_id(&self, cl_ord_id: &str) -> Option<OrderRecord> {
		let inner = self.inner.read().await;
		let order_id = inner.cl_ord_id_to_order_id.get(cl_ord_id)?;
		inner.by_order_id.get(order_id).cloned()
	}

	async fn list_recent(&self) -> Vec<OrderRecord> {
		let inner = self.inner.read().await;
		inner
			.sequence
			.iter()
			.filter_map(|order_id| inner.by_order_id.get(order_id).cloned())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use gateway_types::{OrderSide, OrderStatus, OrderType, TimeInForce};

	fn order(symbol: &str) -> OrderRecord {
		let order_id = Uuid::new_v4();
		OrderRecord {
			order_id,
			cl_ord_id: order_id.to_string(),
			created_at: Utc::now(),
			symbol: symbol.to_string(),
			side: OrderSide::Buy,
			qty: 100,
			order_type: OrderType::Market,
			price: None,
			tif: TimeInForce::Day,
			status: OrderStatus::New,
			message: None,
		}
	}

	#[tokio::test]
	async fn add_indexes_by_both_identifiers() {
		let store = InMemoryOrderStore::new();
		let order = order("AAPL");
		store.add(order.clone()).await.unwrap();

		let by_primary = store.find_by_order_id(order.order_id).await.unwrap();
		let by_correlation = store.find_by_cl_ord_id(&order.cl_ord_id).await.unwrap();
		assert_eq!(by_primary.order_id, order.order_id);
		assert_eq!(by_correlation.order_id, order.order_id);
	}

	#[tokio::test]
	async fn add_rejects_duplicate_primary_identifier() {
		let store = InMemoryOrderStore::new();
		let order = order("AAPL");
		store.add(order.clone()).await.unwrap();

		let err = store.add(order).await.unwrap_err();
		assert!(matches!(err, StoreError::DuplicateOrder(_)));
	}

	#[tokio::test]
	async fn update_replaces_record_in_place() {
		let store = InMemoryOrderStore::new();
		let mut order = order("AAPL");
		store.add(order.clone()).await.unwrap();

		order.status = OrderStatus::Filled;
		order.message = Some("done".to_string());
		store.update(order.clone()).await.unwrap();

		let stored = store.find_by_order_id(order.order_id).await.unwrap();
		assert_eq!(stored.status, OrderStatus::Filled);
		assert_eq!(stored.message.as_deref(), Some("done"));
		// Correlation lookup still resolves after the update.
		assert!(store.find_by_cl_ord_id(&order.cl_ord_id).await.is_some());
	}

	#[tokio::test]
	async fn update_of_unknown_order_is_not_found() {
		let store = InMemoryOrderStore::new();
		let err = store.update(order("AAPL")).await.unwrap_err();
		assert!(matches!(err, StoreError::NotFound));
	}

	#[tokio::test]
	async fn list_recent_is_newest_first() {
		let store = InMemoryOrderStore::new();
		let first = order("AAPL");
		let second = order("MSFT");
		store.add(first.clone()).await.unwrap();
		store.add(second.clone()).await.unwrap();

		let listed = store.list_recent().await;
		assert_eq!(listed.len(), 2);
		assert_eq!(listed[0].order_id, second.order_id);
		assert_eq!(listed[1].order_id, first.order_id);
	}

	#[tokio::test]
	async fn lookups_of_unknown_keys_return_none() {
		let store = InMemoryOrderStore::new();
		assert!(store.find_by_order_id(Uuid::new_v4()).await.is_none());
		assert!(store.find_by_cl_ord_id("missing").await.is_none());
	}
}
