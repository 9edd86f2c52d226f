//! Configuration Module - TOML-based Bot Configuration
//!
//! Loads and validates configuration from `config.toml`. All quoting
//! parameters (symbol, spread, quantity, durations) are externalized
//! here and frozen for the process lifetime - nothing is hardcoded in
//! the domain layer. API credentials come from environment variables,
//! never from the file.

pub mod loader;

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level bot configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the bot begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bot identity and metadata.
    pub bot: BotConfig,
    /// Quote cycle parameters.
    pub quote: QuoteConfig,
    /// Binance API endpoint configuration.
    pub api: ApiConfig,
    /// Metrics and monitoring.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Human-readable bot name.
    pub name: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Quote cycle parameters, immutable for the process lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    /// Trading pair, e.g. "BTCUSDT".
    pub symbol: String,
    /// Total absolute spread in quote-currency units, split evenly
    /// around the reference price.
    pub spread: Decimal,
    /// Order quantity per side in base-asset units.
    pub order_qty: Decimal,
    /// Seconds the quote pair rests before cancellation.
    pub hold_duration_secs: u64,
    /// Seconds to pause after a failed step before retrying.
    pub retry_backoff_secs: u64,
    /// Price precision in decimal places.
    #[serde(default = "default_price_decimals")]
    pub price_decimals: u32,
}

impl QuoteConfig {
    /// Time the quote pair is left resting before cancellation.
    pub fn hold_duration(&self) -> Duration {
        Duration::from_secs(self.hold_duration_secs)
    }

    /// Pause applied after any failed step.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }
}

/// API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Binance REST base URL (testnet by default).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Binance recvWindow for signed requests (milliseconds).
    #[serde(default = "default_recv_window")]
    pub recv_window_ms: u64,
    /// Maximum transport-level retries inside the REST client.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between transport retries (milliseconds).
    #[serde(default = "default_retry_base_delay")]
    pub retry_base_delay_ms: u64,
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Enable the metrics/health HTTP server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Metrics server bind address.
    #[serde(default = "default_metrics_addr")]
    pub bind_address: String,
    /// Health check endpoint port.
    #[serde(default = "default_health_port")]
    pub health_port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            bind_address: default_metrics_addr(),
            health_port: default_health_port(),
        }
    }
}

// Default value functions for serde

fn default_log_level() -> String {
    "info".to_string()
}

fn default_price_decimals() -> u32 {
    2
}

fn default_base_url() -> String {
    "https://testnet.binance.vision".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_recv_window() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay() -> u64 {
    200
}

fn default_true() -> bool {
    true
}

fn default_metrics_addr() -> String {
    "0.0.0.0:9090".to_string()
}

fn default_health_port() -> u16 {
    8080
}
