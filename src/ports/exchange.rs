//! Exchange Client Port - Order and Price Interface
//!
//! Defines the trait the quote-cycle controller requires from an
//! exchange: one price lookup, one order placement, one cancellation.
//! Transport errors and exchange rejections surface identically as
//! failures; the controller treats both uniformly under its retry
//! policy and never inspects the cause.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::order::{LimitOrder, OrderId};

/// Trait for exchange connectivity providers.
///
/// Implementors connect to a spot exchange REST API and expose the
/// three operations the quote cycle consumes. Implementations own
/// their transport concerns (timeouts, authentication, bounded
/// transport-level retries); the controller never sees them.
#[async_trait]
pub trait ExchangeClient: Send + Sync + 'static {
    /// Sample the current reference price for a symbol.
    ///
    /// # Errors
    /// Returns error on transport failure or exchange rejection.
    async fn reference_price(&self, symbol: &str) -> anyhow::Result<Decimal>;

    /// Place a passive limit order and return the exchange-assigned id.
    ///
    /// # Errors
    /// Returns error on transport failure or exchange rejection
    /// (invalid price, insufficient balance, ...).
    async fn place_limit_order(&self, order: &LimitOrder) -> anyhow::Result<OrderId>;

    /// Cancel a resting order by id.
    ///
    /// # Errors
    /// Returns error on transport failure or exchange rejection
    /// (already filled, already cancelled, unknown order).
    async fn cancel_order(&self, symbol: &str, order_id: OrderId) -> anyhow::Result<()>;

    /// Check if the exchange connection is reachable.
    async fn ping(&self) -> bool;
}
