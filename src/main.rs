//! Entry point: wires the RPC client, the sync engine, and the HTTP server
//! together and handles graceful shutdown.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use std::{sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use eth_tx_parser::{
	api,
	models::ParserConfig,
	services::{ethereum::EthereumClient, parser::Parser as SyncEngine},
};

#[derive(Debug, Parser)]
#[command(name = "eth-tx-parser", about = "Ethereum transaction parser service")]
struct Cli {
	/// JSON-RPC endpoint of the Ethereum node
	#[arg(long, env = "ETH_RPC_URL", default_value = "https://cloudflare-eth.com")]
	rpc_url: String,

	/// Address the HTTP API binds to
	#[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
	listen_addr: String,

	/// Milliseconds between poll iterations
	#[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 5000)]
	poll_interval_ms: u64,

	/// Milliseconds between consecutive blocks within a catch-up batch
	#[arg(long, env = "BLOCK_INTERVAL_MS", default_value_t = 500)]
	block_interval_ms: u64,

	/// Seconds to wait for the sync loop to acknowledge shutdown
	#[arg(long, env = "STOP_TIMEOUT_SECS", default_value_t = 60)]
	stop_timeout_secs: u64,

	/// Seconds to drain in-flight HTTP requests on shutdown
	#[arg(long, env = "HTTP_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
	http_shutdown_timeout_secs: u64,
}

impl Cli {
	fn into_config(self) -> ParserConfig {
		ParserConfig {
			rpc_url: self.rpc_url,
			listen_addr: self.listen_addr,
			poll_interval: Duration::from_millis(self.poll_interval_ms),
			block_interval: Duration::from_millis(self.block_interval_ms),
			stop_timeout: Duration::from_secs(self.stop_timeout_secs),
			http_shutdown_timeout: Duration::from_secs(self.http_shutdown_timeout_secs),
		}
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenvy::dotenv().ok();
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let config = Cli::parse().into_config();

	let rpc_client = EthereumClient::new(&config.rpc_url)
		.with_context(|| format!("failed to build RPC client for {}", config.rpc_url))?;
	let engine = Arc::new(SyncEngine::new(rpc_client, config.clone()));

	let engine_task = tokio::spawn({
		let engine = engine.clone();
		async move { engine.run().await }
	});

	let engine_data = web::Data::from(engine.clone());
	let server = HttpServer::new(move || {
		App::new()
			.app_data(engine_data.clone())
			.configure(api::configure::<EthereumClient>)
	})
	.bind(&config.listen_addr)
	.with_context(|| format!("failed to bind {}", config.listen_addr))?
	.shutdown_timeout(config.http_shutdown_timeout.as_secs())
	.run();
	let server_handle = server.handle();
	let server_task = tokio::spawn(server);

	tracing::info!(addr = %config.listen_addr, "server started");
	wait_for_shutdown_signal().await;
	tracing::info!("received stop signal, shutting down");

	// Stop accepting HTTP requests first, then stop the engine; the order
	// keeps readers from hitting an engine that is already torn down.
	server_handle.stop(true).await;
	match engine.stop().await {
		Ok(()) => {
			let _ = engine_task.await;
		}
		Err(e) => {
			tracing::warn!(error = %e, "sync engine shutdown was not acknowledged, proceeding");
			engine_task.abort();
		}
	}

	server_task
		.await
		.context("HTTP server task panicked")?
		.context("HTTP server failed")?;
	tracing::info!("shutdown complete");
	Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
	use tokio::signal::unix::{signal, SignalKind};

	match signal(SignalKind::terminate()) {
		Ok(mut sigterm) => {
			tokio::select! {
				_ = tokio::signal::ctrl_c() => {}
				_ = sigterm.recv() => {}
			}
		}
		Err(e) => {
			tracing::warn!(error = %e, "failed to install SIGTERM handler, using ctrl-c only");
			let _ = tokio::signal::ctrl_c().await;
		}
	}
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
	let _ = tokio::signal::ctrl_c().await;
}
