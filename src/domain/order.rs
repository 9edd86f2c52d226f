//! Core order types.
//!
//! Defines the order vocabulary shared by the controller, the exchange
//! port, and the REST adapter: sides, time-in-force, the limit order
//! request, and the per-cycle open order pair.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange-assigned order identifier (Binance uses int64).
pub type OrderId = i64;

/// Order side — canonical enum used by both domain and ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order time-in-force.
///
/// `Gtc` is the only variant the quoter uses: orders rest on the book
/// until explicitly cancelled at the end of the cycle or filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-cancelled.
    Gtc,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gtc => write!(f, "GTC"),
        }
    }
}

/// A passive limit order request as sent to the exchange port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitOrder {
    /// Trading pair, e.g. "BTCUSDT".
    pub symbol: String,
    /// Buy or sell.
    pub side: Side,
    /// Quantity in base-asset units.
    pub quantity: Decimal,
    /// Limit price in quote-currency units.
    pub price: Decimal,
    /// Time-in-force.
    pub time_in_force: TimeInForce,
}

impl LimitOrder {
    /// Create a new GTC limit order.
    pub fn gtc(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            price,
            time_in_force: TimeInForce::Gtc,
        }
    }
}

/// The two resting orders produced by a successful placement step.
///
/// Owned exclusively by the cycle iteration that placed them; dropped
/// once the cancellation attempts for both ids have been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOrderPair {
    /// Exchange id of the resting buy order.
    pub buy_id: OrderId,
    /// Exchange id of the resting sell order.
    pub sell_id: OrderId,
}
