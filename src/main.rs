//! Binance Spread Bot — Entry Point
//!
//! Initializes configuration, logging, the Binance REST client, and
//! the quote cycle controller. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Load API credentials from env vars (BINANCE_API_KEY, BINANCE_API_SECRET)
//! 4. Create RestClient (HTTP + HMAC signing + transport retry)
//! 5. Create BinanceSpotClient (implements ExchangeClient port)
//! 6. Spawn metrics server (/metrics) and health server (/live + /ready)
//! 7. Spawn the quote cycle controller loop
//! 8. Wait for SIGINT → exit (any resting quote pair stays on the book)

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use binance_spread_bot::adapters::api::auth::BinanceAuth;
use binance_spread_bot::adapters::api::client::{RestClient, RestClientConfig};
use binance_spread_bot::adapters::api::exchange::BinanceSpotClient;
use binance_spread_bot::adapters::metrics::health::{HealthServer, HealthState};
use binance_spread_bot::adapters::metrics::prometheus::MetricsRegistry;
use binance_spread_bot::config;
use binance_spread_bot::ports::exchange::ExchangeClient;
use binance_spread_bot::usecases::quote_cycle::QuoteCycleController;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.bot.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        symbol = %config.quote.symbol,
        base_url = %config.api.base_url,
        "Starting Binance spread bot"
    );

    // ── 3. Shutdown signal channel for the HTTP servers ─────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let health_state = Arc::new(HealthState::new());

    // ── 4. Load API credentials from env vars ───────────────
    let auth =
        Arc::new(BinanceAuth::from_env().context("Failed to load Binance credentials from env")?);

    // ── 5. Create signed REST client ────────────────────────
    let rest_config = RestClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: Duration::from_secs(config.api.timeout_secs),
        recv_window_ms: config.api.recv_window_ms,
        max_retries: config.api.max_retries,
        retry_base_delay: Duration::from_millis(config.api.retry_base_delay_ms),
    };
    let rest_client = Arc::new(
        RestClient::new(Arc::clone(&auth), rest_config).context("Failed to create REST client")?,
    );

    // ── 6. Create exchange adapter (ExchangeClient port) ────
    let exchange = Arc::new(BinanceSpotClient::new(Arc::clone(&rest_client)));

    // Startup connectivity probe. A failure is not fatal: the sampling
    // state retries indefinitely anyway.
    let reachable = exchange.ping().await;
    health_state.exchange_healthy.store(reachable, Ordering::Relaxed);
    if reachable {
        info!("Exchange reachable");
    } else {
        warn!("Exchange unreachable at startup, controller will retry");
    }

    // ── 7. Spawn metrics and health servers ─────────────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to build metrics registry")?);

    if config.metrics.enabled {
        let metrics_ref = Arc::clone(&metrics);
        let metrics_shutdown = shutdown_tx.subscribe();
        let bind_address = config.metrics.bind_address.clone();
        tokio::spawn(async move {
            if let Err(e) = metrics_ref.serve(bind_address, metrics_shutdown).await {
                error!(error = %e, "Metrics server failed");
            }
        });

        let health_server =
            HealthServer::new(Arc::clone(&health_state), config.metrics.health_port);
        let health_shutdown = shutdown_tx.subscribe();
        tokio::spawn(async move {
            if let Err(e) = health_server.run(health_shutdown).await {
                error!(error = %e, "Health server failed");
            }
        });
    }

    // ── 8. Spawn the quote cycle controller ─────────────────
    let controller = QuoteCycleController::new(
        Arc::clone(&exchange),
        config.quote.clone(),
        Arc::clone(&metrics),
    );
    let quoter_handle = tokio::spawn(async move {
        if let Err(e) = controller.run().await {
            error!(error = %e, "Quote cycle stopped unexpectedly");
        }
    });

    info!("All tasks spawned — bot is running");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, exiting");
        }
        _ = quoter_handle => {
            error!("Quote cycle task ended, exiting");
        }
    }

    // The controller exposes no in-band cancellation: a quote pair
    // placed in the current cycle stays resting on the book.
    health_state.quoter_running.store(false, Ordering::Relaxed);
    let _ = shutdown_tx.send(());
    warn!("Exiting; any resting quote pair is left on the book");

    Ok(())
}
