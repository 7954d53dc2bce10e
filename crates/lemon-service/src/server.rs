//! HTTP server for the fast-lemon-api.
//!
//! This module provides the router, shared application state, and the
//! thin request handlers that delegate to the order API implementation.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::Json,
	routing::{get, post},
	Router,
};
use lemon_config::ServerConfig;
use lemon_intake::OrderIntake;
use lemon_types::{ApiError, NewOrderRequest, Order};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::apis::order::OrderQuery;

/// Fixed greeting served on the root route.
const WELCOME: &str = "Welcome to the fast-lemon-api!\n";

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// Reference to the intake service for processing requests.
	pub intake: Arc<OrderIntake>,
}

/// Builds the application router.
///
/// Kept separate from socket binding so tests can drive the router
/// in-process without network I/O.
pub fn build_router(intake: Arc<OrderIntake>) -> Router {
	let app_state = AppState { intake };

	Router::new()
		.route("/", get(read_root))
		.route("/orders/", post(handle_create_order))
		.route("/orders/{id}", get(handle_get_order_by_id))
		.layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
		.with_state(app_state)
}

/// Starts the HTTP server for the API.
pub async fn start_server(
	server_config: ServerConfig,
	intake: Arc<OrderIntake>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = build_router(intake);

	let bind_address = format!("{}:{}", server_config.host, server_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("fast-lemon-api server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles GET / requests with the fixed plain-text welcome.
async fn read_root() -> &'static str {
	WELCOME
}

/// Handles POST /orders/ requests.
///
/// A submission that passes validation is answered with 201 and the
/// created order; any field failure is answered with 422 carrying the
/// complete violation list.
async fn handle_create_order(
	State(state): State<AppState>,
	Json(raw): Json<NewOrderRequest>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
	match crate::apis::order::create_order(&state.intake, raw).await {
		Ok(order) => Ok((StatusCode::CREATED, Json(order))),
		Err(e) => {
			tracing::warn!("Order submission rejected: {}", e);
			Err(e)
		},
	}
}

/// Handles GET /orders/{id} requests.
async fn handle_get_order_by_id(
	Path(id): Path<String>,
	Query(query): Query<OrderQuery>,
	State(state): State<AppState>,
) -> Result<Json<Order>, ApiError> {
	match crate::apis::order::get_order_by_id(&id, &query, &state.intake).await {
		Ok(order) => Ok(Json(order)),
		Err(e) => {
			tracing::warn!("Order retrieval failed: {}", e);
			Err(e)
		},
	}
}
