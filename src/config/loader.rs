//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        symbol = %config.quote.symbol,
        spread = %config.quote.spread,
        order_qty = %config.quote.order_qty,
        hold_secs = config.quote.hold_duration_secs,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(
        !config.quote.symbol.is_empty(),
        "quote.symbol must not be empty"
    );
    anyhow::ensure!(
        config.quote.spread > Decimal::ZERO,
        "quote.spread must be positive, got {}",
        config.quote.spread
    );
    anyhow::ensure!(
        config.quote.order_qty > Decimal::ZERO,
        "quote.order_qty must be positive, got {}",
        config.quote.order_qty
    );
    anyhow::ensure!(
        config.quote.hold_duration_secs > 0,
        "quote.hold_duration_secs must be positive"
    );
    anyhow::ensure!(
        config.quote.retry_backoff_secs > 0,
        "quote.retry_backoff_secs must be positive"
    );
    anyhow::ensure!(
        config.quote.price_decimals <= 8,
        "quote.price_decimals must be at most 8, got {}",
        config.quote.price_decimals
    );

    anyhow::ensure!(
        !config.api.base_url.is_empty(),
        "api.base_url must not be empty"
    );
    anyhow::ensure!(
        config.api.timeout_secs > 0,
        "api.timeout_secs must be positive"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(toml_str: &str) -> AppConfig {
        toml::from_str(toml_str).expect("parse failed")
    }

    const MINIMAL: &str = r#"
        [bot]
        name = "test-bot"

        [quote]
        symbol = "BTCUSDT"
        spread = "20.0"
        order_qty = "0.001"
        hold_duration_secs = 30
        retry_backoff_secs = 5

        [api]
    "#;

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = parse(MINIMAL);
        assert_eq!(config.quote.spread, dec!(20.0));
        assert_eq!(config.quote.price_decimals, 2);
        assert_eq!(config.api.base_url, "https://testnet.binance.vision");
        assert_eq!(config.api.recv_window_ms, 5000);
        assert!(config.metrics.enabled);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duration_helpers() {
        let config = parse(MINIMAL);
        assert_eq!(config.quote.hold_duration().as_secs(), 30);
        assert_eq!(config.quote.retry_backoff().as_secs(), 5);
    }

    #[test]
    fn test_rejects_zero_spread() {
        let mut config = parse(MINIMAL);
        config.quote.spread = Decimal::ZERO;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_negative_qty() {
        let mut config = parse(MINIMAL);
        config.quote.order_qty = dec!(-0.001);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_empty_symbol() {
        let mut config = parse(MINIMAL);
        config.quote.symbol = String::new();
        assert!(validate_config(&config).is_err());
    }
}
