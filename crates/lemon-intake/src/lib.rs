//! Order intake for the fast-lemon-api service.
//!
//! This crate composes the validator/normalizer with the order store:
//! a submission that passes every field check acquires a unique
//! identifier and its initial lifecycle state, is persisted, and can be
//! retrieved by identifier afterwards. The store is never touched for a
//! submission that fails validation.

use chrono::Utc;
use lemon_storage::{OrderStore, StorageError};
use lemon_types::{validate_new_order, NewOrderRequest, Order, OrderStatus, ValidationErrors};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during intake operations.
#[derive(Debug, Error)]
pub enum IntakeError {
	/// The submission failed one or more field checks.
	#[error(transparent)]
	Validation(#[from] ValidationErrors),
	/// No order exists under the given identifier.
	#[error("no such order")]
	NotFound,
	/// The storage backend failed. Unreachable with the in-memory
	/// backend; exists for substitutable persistent ones.
	#[error("storage backend failure: {0}")]
	Storage(String),
}

impl From<StorageError> for IntakeError {
	fn from(err: StorageError) -> Self {
		match err {
			StorageError::NotFound => IntakeError::NotFound,
			other => IntakeError::Storage(other.to_string()),
		}
	}
}

/// The order store and lifecycle manager.
///
/// Owns the storage handle exclusively; request handlers share it
/// through an `Arc` rather than a process-wide global.
pub struct OrderIntake {
	store: OrderStore,
}

impl OrderIntake {
	/// Creates a new intake service over the given store.
	pub fn new(store: OrderStore) -> Self {
		Self { store }
	}

	/// Validates a submission and, on success, creates the order.
	///
	/// Creation mints a fresh UUID v4 (collision-free for the process
	/// lifetime), assigns [`OrderStatus::Open`], and inserts the record
	/// before returning it in full. Every field violation is collected
	/// and returned in one error; nothing is written in that case.
	pub async fn create(&self, raw: &NewOrderRequest) -> Result<Order, IntakeError> {
		let normalized = validate_new_order(raw, Utc::now())?;

		let order = Order {
			id: Uuid::new_v4(),
			instrument_id: normalized.instrument_id,
			limit_price: normalized.limit_price,
			side: normalized.side,
			valid_until: normalized.valid_until,
			quantity: normalized.quantity,
			status: OrderStatus::Open,
		};
		self.store.insert(&order).await?;
		Ok(order)
	}

	/// Retrieves the order stored under the given identifier, unchanged.
	pub async fn get(&self, id: Uuid) -> Result<Order, IntakeError> {
		Ok(self.store.fetch(id).await?)
	}
}
