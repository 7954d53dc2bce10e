//! Order API implementation.
//!
//! Submission and retrieval logic behind the HTTP handlers: the UUID
//! gate on path identifiers, the intake calls, and the mapping of
//! intake failures onto API errors.

use lemon_intake::{IntakeError, OrderIntake};
use lemon_types::{ApiError, NewOrderRequest, Order};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Query parameters accepted by order retrieval.
#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
	/// Unused filter placeholder.
	pub q: Option<String>,
}

/// Processes an order submission.
pub async fn create_order(intake: &OrderIntake, raw: NewOrderRequest) -> Result<Order, ApiError> {
	let order = intake.create(&raw).await.map_err(map_intake_error)?;
	info!(order_id = %order.id, "order created");
	Ok(order)
}

/// Processes an order retrieval request.
///
/// The path segment must parse as a UUID before the store is consulted;
/// a malformed identifier is an input-format error, distinct from a
/// missing order.
pub async fn get_order_by_id(
	id: &str,
	_query: &OrderQuery,
	intake: &OrderIntake,
) -> Result<Order, ApiError> {
	let id = Uuid::parse_str(id).map_err(|_| ApiError::MalformedId(id.to_string()))?;
	intake.get(id).await.map_err(map_intake_error)
}

fn map_intake_error(err: IntakeError) -> ApiError {
	match err {
		IntakeError::Validation(errors) => ApiError::Validation(errors),
		IntakeError::NotFound => ApiError::NotFound,
		IntakeError::Storage(message) => ApiError::Storage(message),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lemon_storage::implementations::memory::MemoryStorage;
	use lemon_storage::OrderStore;

	fn intake() -> OrderIntake {
		OrderIntake::new(OrderStore::new(Box::new(MemoryStorage::new())))
	}

	#[tokio::test]
	async fn malformed_id_is_rejected_before_lookup() {
		let intake = intake();

		let err = get_order_by_id("not-a-uuid", &OrderQuery::default(), &intake)
			.await
			.unwrap_err();
		assert!(matches!(err, ApiError::MalformedId(_)));
	}

	#[tokio::test]
	async fn unknown_id_is_not_found() {
		let intake = intake();
		let id = Uuid::new_v4().to_string();

		let err = get_order_by_id(&id, &OrderQuery::default(), &intake)
			.await
			.unwrap_err();
		assert!(matches!(err, ApiError::NotFound));
	}
}
