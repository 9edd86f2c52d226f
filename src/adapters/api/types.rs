//! Binance REST API response types.
//!
//! Deserialization targets for the three endpoints the bot consumes.
//! Prices arrive as JSON strings and map straight onto `Decimal`.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Response of `GET /api/v3/avgPrice`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgPrice {
    /// Averaging window in minutes.
    pub mins: u32,
    /// Current average price.
    pub price: Decimal,
}

/// ACK response of `POST /api/v3/order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub symbol: String,
    /// Exchange-assigned order id.
    pub order_id: i64,
    /// Echo of the client order id we attached.
    pub client_order_id: String,
    /// Server timestamp of the placement (Unix ms).
    pub transact_time: u64,
}

/// Response of `DELETE /api/v3/order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAck {
    pub symbol: String,
    pub order_id: i64,
    /// Terminal order status, "CANCELED" on success.
    pub status: String,
}

/// Error body Binance attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Binance error code, e.g. -2010 insufficient balance.
    pub code: i64,
    pub msg: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "binance error {}: {}", self.code, self.msg)
    }
}
