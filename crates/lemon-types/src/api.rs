//! API error types for the fast-lemon-api HTTP surface.
//!
//! This module defines the error taxonomy surfaced to clients and its
//! mapping onto HTTP status codes and the `{"detail": ...}` envelope
//! used by every failing endpoint.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::validation::{FieldViolation, ValidationErrors};

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
	pub detail: ErrorDetail,
}

/// Payload of the `detail` field: a bare message for resource-level
/// failures, a violation list for field-level ones.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
	Message(String),
	Violations(Vec<FieldViolation>),
}

/// Structured API error with HTTP status mapping.
///
/// Every failure this service produces is a client-input problem; the
/// `Storage` variant exists only so a fallible persistent backend can
/// slot in behind the storage trait.
#[derive(Debug, Error)]
pub enum ApiError {
	/// One or more field-level constraint violations (422).
	#[error(transparent)]
	Validation(#[from] ValidationErrors),
	/// The path identifier does not parse as an order id (422).
	#[error("order id must be a UUID: {0}")]
	MalformedId(String),
	/// No order exists under the given identifier (404).
	#[error("No such order")]
	NotFound,
	/// The storage backend failed (500).
	#[error("storage backend failure: {0}")]
	Storage(String),
}

impl ApiError {
	/// HTTP status code for this error.
	pub fn status_code(&self) -> StatusCode {
		match self {
			ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::MalformedId(_) => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::NotFound => StatusCode::NOT_FOUND,
			ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Converts to the `{"detail": ...}` envelope for serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		let detail = match self {
			ApiError::Validation(errors) => ErrorDetail::Violations(errors.violations()),
			ApiError::MalformedId(_) => ErrorDetail::Violations(vec![FieldViolation {
				loc: vec!["path".to_string(), "order_id".to_string()],
				msg: self.to_string(),
				kind: "type_error".to_string(),
				ctx: Some(serde_json::json!({ "expected": "uuid" })),
			}]),
			ApiError::NotFound => ErrorDetail::Message(self.to_string()),
			ApiError::Storage(_) => ErrorDetail::Message(self.to_string()),
		};
		ErrorResponse { detail }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		(status, Json(self.to_error_response())).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validation::FieldError;

	#[test]
	fn not_found_has_exact_detail() {
		let body = serde_json::to_value(ApiError::NotFound.to_error_response()).unwrap();
		assert_eq!(body, serde_json::json!({ "detail": "No such order" }));
		assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
	}

	#[test]
	fn malformed_id_is_a_path_violation() {
		let err = ApiError::MalformedId("not-a-uuid".to_string());
		assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

		let body = serde_json::to_value(err.to_error_response()).unwrap();
		assert_eq!(body["detail"][0]["loc"], serde_json::json!(["path", "order_id"]));
		assert_eq!(body["detail"][0]["type"], "type_error");
	}

	#[test]
	fn validation_errors_become_detail_array() {
		let errors = ValidationErrors {
			fields: vec![(
				"side",
				FieldError::Enum {
					allowed: &["buy", "sell"],
				},
			)],
		};
		let err = ApiError::from(errors);
		assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

		let body = serde_json::to_value(err.to_error_response()).unwrap();
		assert_eq!(body["detail"][0]["loc"], serde_json::json!(["body", "side"]));
		assert_eq!(body["detail"][0]["type"], "enum_error");
		assert_eq!(
			body["detail"][0]["ctx"]["allowed"],
			serde_json::json!(["buy", "sell"])
		);
	}
}
