//! In-memory storage backend for the order store.
//!
//! Orders live only for the process lifetime; a restart starts empty.
//! This is the only backend the service ships with.

use crate::{StorageError, StorageInterface};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage implementation.
///
/// Data is held in a HashMap behind a read-write lock. The write lock
/// is the single mutual-exclusion boundary around insertion; readers
/// take the read lock and never observe a partially written record.
pub struct MemoryStorage {
	/// The in-memory store protected by a read-write lock.
	store: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
	/// Creates a new MemoryStorage instance.
	pub fn new() -> Self {
		Self {
			store: Arc::new(RwLock::new(HashMap::new())),
		}
	}
}

impl Default for MemoryStorage {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl StorageInterface for MemoryStorage {
	async fn get_bytes(&self, key: &str) -> Result<Vec<u8>, StorageError> {
		let store = self.store.read().await;
		store.get(key).cloned().ok_or(StorageError::NotFound)
	}

	async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.insert(key.to_string(), value);
		Ok(())
	}

	async fn delete(&self, key: &str) -> Result<(), StorageError> {
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
	}

	async fn exists(&self, key: &str) -> Result<bool, StorageError> {
		let store = self.store.read().await;
		Ok(store.contains_key(key))
	}
}

/// Factory function to create a memory storage backend from configuration.
///
/// The memory backend takes no configuration parameters.
pub fn create_storage(_config: &toml::Value) -> Result<Box<dyn StorageInterface>, StorageError> {
	Ok(Box::new(MemoryStorage::new()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_basic_operations() {
		let storage = MemoryStorage::new();

		let key = "orders:5f6c1a90-0000-4000-8000-000000000001";
		let value = br#"{"quantity":1}"#.to_vec();
		storage.set_bytes(key, value.clone()).await.unwrap();

		let retrieved = storage.get_bytes(key).await.unwrap();
		assert_eq!(retrieved, value);

		assert!(storage.exists(key).await.unwrap());

		storage.delete(key).await.unwrap();
		assert!(!storage.exists(key).await.unwrap());

		let result = storage.get_bytes(key).await;
		assert!(matches!(result, Err(StorageError::NotFound)));
	}

	#[tokio::test]
	async fn test_concurrent_writers_keep_all_keys() {
		let storage = Arc::new(MemoryStorage::new());

		let mut handles = Vec::new();
		for i in 0..16 {
			let storage = Arc::clone(&storage);
			handles.push(tokio::spawn(async move {
				let key = format!("orders:{:032x}", i);
				storage.set_bytes(&key, vec![i as u8]).await.unwrap();
			}));
		}
		for handle in handles {
			handle.await.unwrap();
		}

		for i in 0..16 {
			let key = format!("orders:{:032x}", i);
			assert_eq!(storage.get_bytes(&key).await.unwrap(), vec![i as u8]);
		}
	}

	#[tokio::test]
	async fn test_factory_creates_empty_backend() {
		let backend = create_storage(&toml::Value::Table(toml::map::Map::new())).unwrap();
		assert!(!backend.exists("orders:anything").await.unwrap());
	}
}
