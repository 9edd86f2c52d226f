//! Binance Authentication — HMAC-SHA256 Request Signing
//!
//! Signs every private REST request using HMAC-SHA256 over the full
//! query string, hex-encoded, per the Binance API specification.
//! Credentials come from environment variables (BINANCE_API_KEY,
//! BINANCE_API_SECRET).

use anyhow::{Context, Result};

/// Binance API authentication handler.
///
/// Holds the API key and secret loaded from env vars. The secret is
/// NEVER sent on the wire — only the computed signature.
pub struct BinanceAuth {
    /// API key from BINANCE_API_KEY env var, sent as X-MBX-APIKEY.
    api_key: String,
    /// API secret from BINANCE_API_SECRET env var.
    api_secret: String,
}

impl BinanceAuth {
    /// Load credentials from environment variables.
    ///
    /// Required env vars: BINANCE_API_KEY, BINANCE_API_SECRET.
    /// These MUST be set in the environment (never committed to git).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BINANCE_API_KEY").context("BINANCE_API_KEY not set")?;
        let api_secret =
            std::env::var("BINANCE_API_SECRET").context("BINANCE_API_SECRET not set")?;

        Ok(Self {
            api_key,
            api_secret,
        })
    }

    /// Build an auth handler from explicit credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Get the API key for the X-MBX-APIKEY request header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Current Unix timestamp in milliseconds (Binance `timestamp` param).
    pub fn timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Sign a query string using HMAC-SHA256.
    ///
    /// Binance verifies `signature = hex(HMAC-SHA256(secret, query))`
    /// over the exact query string sent, including `timestamp` and
    /// `recvWindow`.
    pub fn sign(&self, query: &str) -> String {
        let mac = hmac_sha256::HMAC::mac(query.as_bytes(), self.api_secret.as_bytes());
        hex::encode(mac)
    }
}
