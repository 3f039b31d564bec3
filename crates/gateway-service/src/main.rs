//! Main entry point for the FIX gateway service.
//!
//! This binary loads configuration, wires the gateway engine, and runs the
//! engine loop and the HTTP API server concurrently until either finishes or
//! the process is interrupted.

use clap::Parser;
use gateway_config::Config;
use gateway_core::GatewayEngine;
use gateway_service::server;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the gateway service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.init();

	tracing::info!("Started gateway");

	let config = Config::from_file(&args.config).await?;
	tracing::info!(transport = %config.session.transport, "Loaded configuration");

	let api_config = config.api.clone();
	let engine = Arc::new(GatewayEngine::new(config)?);

	let engine_task = engine.run();
	let api_task = server::start_server(api_config, Arc::clone(&engine));

	tokio::select! {
		result = engine_task => {
			tracing::info!("Engine finished");
			result?;
		}
		result = api_task => {
			tracing::info!("API server finished");
			result?;
		}
	}

	tracing::info!("Stopped gateway");
	Ok(())
}
