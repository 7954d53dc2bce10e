//! Order domain types for the intake service.
//!
//! This module defines the stored order entity, its side and lifecycle
//! enumerations, and the raw/normalized submission payloads that flow
//! through validation before a record is created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Direction of an order.
///
/// Accepted case-insensitively on input and stored in its lowercase
/// canonical form, which is also the wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
	Buy,
	Sell,
}

impl OrderSide {
	/// Canonical tokens accepted for this enum, in wire form.
	pub const ALLOWED: &'static [&'static str] = &["buy", "sell"];

	/// Returns the lowercase canonical token for this side.
	pub fn as_str(&self) -> &'static str {
		match self {
			OrderSide::Buy => "buy",
			OrderSide::Sell => "sell",
		}
	}
}

impl fmt::Display for OrderSide {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	/// Order has been accepted and is awaiting execution.
	Open,
	/// Order has been executed.
	///
	/// Reserved for a future execution path; intake only ever mints
	/// `Open` and no `open -> executed` trigger exists yet.
	Executed,
}

impl fmt::Display for OrderStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OrderStatus::Open => write!(f, "open"),
			OrderStatus::Executed => write!(f, "executed"),
		}
	}
}

/// A client-submitted instruction to buy or sell a quantity of an
/// instrument at a limit price, valid until a deadline.
///
/// Created only through successful validation plus store insertion;
/// immutable afterwards. `valid_until` is held as structured UTC time
/// internally and serialized as integer epoch seconds on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
	/// Unique identifier, minted at creation and used as the sole
	/// lookup key.
	pub id: Uuid,
	/// ISIN-shaped 12-character instrument code. Length is enforced;
	/// the checksum is not validated.
	#[serde(rename = "instrumentId")]
	pub instrument_id: String,
	/// Strictly positive limit price. Currency is implicit.
	#[serde(rename = "limitPrice")]
	pub limit_price: f64,
	/// Direction of the order.
	pub side: OrderSide,
	/// Deadline after which the order is no longer valid. Strictly in
	/// the future at validation time; not swept afterwards.
	#[serde(rename = "validUntil", with = "chrono::serde::ts_seconds")]
	pub valid_until: DateTime<Utc>,
	/// Strictly positive number of units.
	pub quantity: u64,
	/// Current lifecycle status.
	pub status: OrderStatus,
}

/// Raw order submission payload, as received on the wire.
///
/// Numeric fields are deliberately permissive (`f64`) so that every
/// field-level constraint — including the exact-integer check on
/// `quantity` — is reported through validation rather than as an opaque
/// body-level deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderRequest {
	#[serde(rename = "instrumentId")]
	pub instrument_id: String,
	#[serde(rename = "limitPrice")]
	pub limit_price: f64,
	pub side: String,
	/// Epoch seconds.
	#[serde(rename = "validUntil")]
	pub valid_until: f64,
	pub quantity: f64,
}

/// A submission that has passed every field check, with representations
/// normalized. Input to order creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOrder {
	pub instrument_id: String,
	pub limit_price: f64,
	pub side: OrderSide,
	pub valid_until: DateTime<Utc>,
	pub quantity: u64,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_order() -> Order {
		Order {
			id: Uuid::new_v4(),
			instrument_id: "DE000BASF111".to_string(),
			limit_price: 0.2,
			side: OrderSide::Buy,
			valid_until: DateTime::from_timestamp(1_996_943_663, 0).unwrap(),
			quantity: 1,
			status: OrderStatus::Open,
		}
	}

	#[test]
	fn order_serializes_valid_until_as_integer_epoch() {
		let order = sample_order();
		let json = serde_json::to_value(&order).unwrap();

		assert_eq!(json["validUntil"], serde_json::json!(1_996_943_663));
		assert_eq!(json["side"], "buy");
		assert_eq!(json["status"], "open");
		assert_eq!(json["instrumentId"], "DE000BASF111");
	}

	#[test]
	fn order_json_round_trips() {
		let order = sample_order();
		let json = serde_json::to_string(&order).unwrap();
		let back: Order = serde_json::from_str(&json).unwrap();
		assert_eq!(back, order);
	}

	#[test]
	fn side_display_matches_wire_form() {
		assert_eq!(OrderSide::Buy.to_string(), "buy");
		assert_eq!(OrderSide::Sell.to_string(), "sell");
		assert_eq!(OrderStatus::Executed.to_string(), "executed");
	}
}
