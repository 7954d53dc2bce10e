//! Storage module for the fast-lemon-api service.
//!
//! This module provides the abstraction over order persistence: a
//! byte-level backend trait so the in-memory implementation can later be
//! swapped for a persistent one without touching the validation
//! contract, plus the typed [`OrderStore`] wrapper the intake service
//! works with.

use async_trait::async_trait;
use lemon_types::Order;
use thiserror::Error;
use uuid::Uuid;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

/// Namespace prefix under which order records are keyed.
const ORDERS_NAMESPACE: &str = "orders";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs when a requested record is not found.
	#[error("Not found")]
	NotFound,
	/// Error that occurs during serialization/deserialization.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Trait defining the low-level interface for storage backends.
///
/// Implementations must guarantee that a write is observed either fully
/// or not at all by concurrent readers.
#[async_trait]
pub trait StorageInterface: Send + Sync {
	/// Retrieves raw bytes for the given key.
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError>;

	/// Stores raw bytes under the given key.
	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;

	/// Deletes the value associated with the given key.
	async fn delete(&self, key: &str) -> Result<(), StorageError>;

	/// Checks if a key exists in storage.
	async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}

/// Type alias for storage factory functions.
///
/// This is the function signature that storage implementations provide
/// to create instances of their storage interface from configuration.
pub type StorageFactory = fn(&toml::Value) -> Result<Box<dyn StorageInterface>, StorageError>;

/// Typed order store on top of a storage backend.
///
/// The store exclusively owns all order records: they are inserted once
/// under their freshly minted identifier and never mutated afterwards.
/// Serialization to and from JSON happens at this boundary.
pub struct OrderStore {
	/// The underlying storage backend implementation.
	backend: Box<dyn StorageInterface>,
}

impl OrderStore {
	/// Creates a new OrderStore with the specified backend.
	pub fn new(backend: Box<dyn StorageInterface>) -> Self {
		Self { backend }
	}

	fn key(id: Uuid) -> String {
		format!("{}:{}", ORDERS_NAMESPACE, id)
	}

	/// Inserts a freshly created order under its identifier.
	///
	/// Identifiers are minted per insertion, so this never overwrites an
	/// existing record in practice.
	pub async fn insert(&self, order: &Order) -> Result<(), StorageError> {
		let bytes = serde_json::to_vec(order)
			.map_err(|e| StorageError::Serialization(e.to_string()))?;
		self.backend.set_bytes(&Self::key(order.id), bytes).await
	}

	/// Retrieves the order stored under the given identifier.
	pub async fn fetch(&self, id: Uuid) -> Result<Order, StorageError> {
		let bytes = self.backend.get_bytes(&Self::key(id)).await?;
		serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
	}

	/// Checks whether an order exists under the given identifier.
	pub async fn contains(&self, id: Uuid) -> Result<bool, StorageError> {
		self.backend.exists(&Self::key(id)).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::memory::MemoryStorage;
	use chrono::DateTime;
	use lemon_types::{OrderSide, OrderStatus};

	fn sample_order() -> Order {
		Order {
			id: Uuid::new_v4(),
			instrument_id: "US0378331005".to_string(),
			limit_price: 145.5,
			side: OrderSide::Sell,
			valid_until: DateTime::from_timestamp(1_996_943_663, 0).unwrap(),
			quantity: 40,
			status: OrderStatus::Open,
		}
	}

	#[tokio::test]
	async fn insert_then_fetch_returns_equal_record() {
		let store = OrderStore::new(Box::new(MemoryStorage::new()));
		let order = sample_order();

		store.insert(&order).await.unwrap();
		let fetched = store.fetch(order.id).await.unwrap();
		assert_eq!(fetched, order);
		assert!(store.contains(order.id).await.unwrap());
	}

	#[tokio::test]
	async fn fetch_unknown_id_is_not_found() {
		let store = OrderStore::new(Box::new(MemoryStorage::new()));

		let result = store.fetch(Uuid::new_v4()).await;
		assert!(matches!(result, Err(StorageError::NotFound)));
		assert!(!store.contains(Uuid::new_v4()).await.unwrap());
	}

	#[tokio::test]
	async fn records_are_keyed_per_identifier() {
		let store = OrderStore::new(Box::new(MemoryStorage::new()));
		let first = sample_order();
		let second = Order {
			id: Uuid::new_v4(),
			quantity: 7,
			..first.clone()
		};

		store.insert(&first).await.unwrap();
		store.insert(&second).await.unwrap();

		assert_eq!(store.fetch(first.id).await.unwrap().quantity, 40);
		assert_eq!(store.fetch(second.id).await.unwrap().quantity, 7);
	}
}
