//! Main entry point for the fast-lemon-api service.
//!
//! This binary wires the configured storage backend into the order
//! intake service and serves the HTTP API: order submission, retrieval
//! by identifier, and the root welcome route.

use clap::Parser;
use lemon_config::Config;
use lemon_intake::OrderIntake;
use lemon_service::server;
use lemon_storage::{implementations::memory, OrderStore, StorageFactory};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file; built-in defaults apply when omitted
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

/// Main entry point for the service.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration (file or defaults)
/// 4. Builds the intake service over the configured storage backend
/// 5. Serves the HTTP API until interrupted
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	// Create env filter with default from args
	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt().with_env_filter(env_filter).with_target(true).init();

	let config = match &args.config {
		Some(path) => Config::from_file(path)?,
		None => Config::default(),
	};
	tracing::info!("Loaded configuration [storage: {}]", config.storage.primary);

	let intake = build_intake(&config)?;
	server::start_server(config.server, Arc::new(intake)).await?;

	Ok(())
}

/// Builds the intake service over the storage backend named by the
/// configuration. Unknown backend names are rejected at startup.
fn build_intake(config: &Config) -> Result<OrderIntake, Box<dyn std::error::Error>> {
	let factory: StorageFactory = match config.storage.primary.as_str() {
		"memory" => memory::create_storage,
		other => {
			return Err(format!("unknown storage implementation '{}'", other).into());
		},
	};

	let backend_config = config.storage.implementation_config(&config.storage.primary);
	let backend = factory(&backend_config)?;

	Ok(OrderIntake::new(OrderStore::new(backend)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_args_default_values() {
		let args = Args {
			config: None,
			log_level: "info".to_string(),
		};

		assert!(args.config.is_none());
		assert_eq!(args.log_level, "info");
	}

	#[test]
	fn test_build_intake_with_default_config() {
		let config = Config::default();

		let result = build_intake(&config);
		assert!(result.is_ok(), "failed to build intake: {:?}", result.err());
	}

	#[test]
	fn test_build_intake_rejects_unknown_backend() {
		let mut config = Config::default();
		config.storage.primary = "redis".to_string();

		let result = build_intake(&config);
		assert!(result.is_err());
	}
}
