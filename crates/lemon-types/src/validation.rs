//! Field-level validation and normalization of order submissions.
//!
//! Each field of a raw submission is checked by its own function
//! returning a tagged error variant; all violations are collected into a
//! single [`ValidationErrors`] value rather than short-circuiting on the
//! first failure. Normalization (side case folding, epoch-to-structured
//! time conversion) happens inside the checks, so a successful pass
//! yields a [`NormalizedOrder`] ready for creation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::order::{NewOrderRequest, NormalizedOrder, OrderSide};

/// Required length of an instrument identifier (ISIN-shaped).
pub const INSTRUMENT_ID_LEN: usize = 12;

/// A single field-level constraint violation.
///
/// Variants carry the context a caller needs to act on the failure
/// (the violated bound, the allowed set) in addition to the message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
	/// The value does not have the required length.
	#[error("ensure this value has exactly {expected} characters (got {actual})")]
	Length { expected: usize, actual: usize },
	/// The value is outside its permitted range.
	#[error("ensure this value is greater than {must_be_greater_than}")]
	Range { must_be_greater_than: i64 },
	/// The value is not representable as the required type.
	#[error("value is not a valid {expected}")]
	Type { expected: &'static str },
	/// The value is not a member of a closed enumeration.
	#[error("value is not a valid enumeration member; permitted: {}", .allowed.join(", "))]
	Enum { allowed: &'static [&'static str] },
	/// The value fails a temporal-ordering constraint.
	#[error("{reason}")]
	Temporal { reason: String },
}

impl FieldError {
	/// Machine-checkable kind tag for the wire representation.
	pub fn kind(&self) -> &'static str {
		match self {
			FieldError::Length { .. } => "length_error",
			FieldError::Range { .. } => "range_error",
			FieldError::Type { .. } => "type_error",
			FieldError::Enum { .. } => "enum_error",
			FieldError::Temporal { .. } => "temporal_error",
		}
	}

	/// Structured context for the wire representation, if any.
	pub fn context(&self) -> Option<serde_json::Value> {
		match self {
			FieldError::Length { expected, actual } => {
				Some(serde_json::json!({ "expected": expected, "actual": actual }))
			},
			FieldError::Range { must_be_greater_than } => {
				Some(serde_json::json!({ "must_be_greater_than": must_be_greater_than }))
			},
			FieldError::Type { expected } => Some(serde_json::json!({ "expected": expected })),
			FieldError::Enum { allowed } => Some(serde_json::json!({ "allowed": allowed })),
			FieldError::Temporal { .. } => None,
		}
	}
}

/// Wire form of a single violation, one entry of the 422 `detail` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
	/// Path to the offending value, e.g. `["body", "quantity"]`.
	pub loc: Vec<String>,
	/// Human-readable message.
	pub msg: String,
	/// Machine-checkable kind tag.
	#[serde(rename = "type")]
	pub kind: String,
	/// Violated bound, allowed set, or other structured context.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ctx: Option<serde_json::Value>,
}

/// The complete set of field failures for one submission.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("order validation failed: {} field(s) rejected", .fields.len())]
pub struct ValidationErrors {
	/// Violations keyed by wire field name, in field order.
	pub fields: Vec<(&'static str, FieldError)>,
}

impl ValidationErrors {
	/// Renders every violation into its wire form, rooted at the
	/// request body.
	pub fn violations(&self) -> Vec<FieldViolation> {
		self.fields
			.iter()
			.map(|(field, err)| FieldViolation {
				loc: vec!["body".to_string(), (*field).to_string()],
				msg: err.to_string(),
				kind: err.kind().to_string(),
				ctx: err.context(),
			})
			.collect()
	}
}

/// Validates and normalizes a raw submission against the supplied clock
/// instant.
///
/// Pure function of the input and `now`; every field is checked
/// independently and all violations are returned together. On success
/// the returned order carries the folded side and the structured
/// deadline.
pub fn validate_new_order(
	raw: &NewOrderRequest,
	now: DateTime<Utc>,
) -> Result<NormalizedOrder, ValidationErrors> {
	let mut fields: Vec<(&'static str, FieldError)> = Vec::new();

	if let Err(e) = check_instrument_id(&raw.instrument_id) {
		fields.push(("instrumentId", e));
	}
	if let Err(e) = check_limit_price(raw.limit_price) {
		fields.push(("limitPrice", e));
	}
	let side = match check_side(&raw.side) {
		Ok(side) => Some(side),
		Err(e) => {
			fields.push(("side", e));
			None
		},
	};
	let valid_until = match check_valid_until(raw.valid_until, now) {
		Ok(deadline) => Some(deadline),
		Err(e) => {
			fields.push(("validUntil", e));
			None
		},
	};
	let quantity = match check_quantity(raw.quantity) {
		Ok(quantity) => Some(quantity),
		Err(e) => {
			fields.push(("quantity", e));
			None
		},
	};

	match (side, valid_until, quantity) {
		(Some(side), Some(valid_until), Some(quantity)) if fields.is_empty() => Ok(NormalizedOrder {
			instrument_id: raw.instrument_id.clone(),
			limit_price: raw.limit_price,
			side,
			valid_until,
			quantity,
		}),
		_ => Err(ValidationErrors { fields }),
	}
}

/// The identifier must be exactly [`INSTRUMENT_ID_LEN`] characters.
/// No checksum validation beyond the length.
fn check_instrument_id(raw: &str) -> Result<(), FieldError> {
	let actual = raw.chars().count();
	if actual != INSTRUMENT_ID_LEN {
		return Err(FieldError::Length {
			expected: INSTRUMENT_ID_LEN,
			actual,
		});
	}
	Ok(())
}

fn check_limit_price(raw: f64) -> Result<(), FieldError> {
	if raw > 0.0 {
		Ok(())
	} else {
		Err(FieldError::Range {
			must_be_greater_than: 0,
		})
	}
}

/// Folds the token to lowercase, then matches it against the closed
/// side set. Mixed case is accepted; non-members after folding are not.
fn check_side(raw: &str) -> Result<OrderSide, FieldError> {
	match raw.to_lowercase().as_str() {
		"buy" => Ok(OrderSide::Buy),
		"sell" => Ok(OrderSide::Sell),
		_ => Err(FieldError::Enum {
			allowed: OrderSide::ALLOWED,
		}),
	}
}

/// The deadline must be strictly after `now`. The comparison is
/// numeric-epoch against numeric-epoch; conversion to structured time
/// happens only once the ordering check has passed.
fn check_valid_until(raw: f64, now: DateTime<Utc>) -> Result<DateTime<Utc>, FieldError> {
	if !raw.is_finite() {
		return Err(FieldError::Temporal {
			reason: "valid_until is not a representable timestamp".to_string(),
		});
	}
	if raw <= now.timestamp() as f64 {
		return Err(FieldError::Temporal {
			reason: "valid_until cannot be in the past".to_string(),
		});
	}
	DateTime::from_timestamp(raw.trunc() as i64, (raw.fract() * 1e9) as u32).ok_or_else(|| {
		FieldError::Temporal {
			reason: "valid_until is not a representable timestamp".to_string(),
		}
	})
}

/// The quantity must be an exact integer and strictly positive. A
/// fractional value is a type error, distinct from the positivity check.
fn check_quantity(raw: f64) -> Result<u64, FieldError> {
	if !raw.is_finite() || raw.fract() != 0.0 || raw >= u64::MAX as f64 {
		return Err(FieldError::Type { expected: "integer" });
	}
	if raw <= 0.0 {
		return Err(FieldError::Range {
			must_be_greater_than: 0,
		});
	}
	Ok(raw as u64)
}
