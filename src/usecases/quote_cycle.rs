//! Quote Cycle Controller - Core Quoting Loop
//!
//! The main market-making use case. Each cycle:
//! 1. Samples the reference price for the configured symbol
//! 2. Computes the bid/ask pair straddling it by half the spread
//! 3. Places the buy, then the sell, both GTC
//! 4. Holds the pair for the configured duration, no fill polling
//! 5. Cancels whatever of the two orders remains open
//!
//! Every failure is logged and absorbed into a fixed backoff followed
//! by a fresh cycle (re-sampling the price, never re-quoting a stale
//! one). Nothing here terminates the process: the loop runs until the
//! host process is killed.
//!
//! One deliberate exposure is preserved from the original design: if
//! the buy lands but the sell is rejected, the buy is left resting on
//! the book. It is logged and counted, not auto-cancelled.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::metrics::prometheus::MetricsRegistry;
use crate::config::QuoteConfig;
use crate::domain::order::{LimitOrder, OpenOrderPair, OrderId, Side};
use crate::domain::quote::QuotePair;
use crate::ports::exchange::ExchangeClient;

/// Per-step failures surfaced by the cycle.
///
/// Each variant carries enough context (symbol, side, order id,
/// underlying error) to diagnose from the log line alone. None of
/// these propagate out of the controller; they are logged and folded
/// into the retry policy.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("price lookup failed for {symbol}: {cause}")]
    PriceLookup {
        symbol: String,
        cause: anyhow::Error,
    },

    #[error("{side} order placement failed for {symbol}: {cause}")]
    OrderPlacement {
        symbol: String,
        side: Side,
        cause: anyhow::Error,
    },

    #[error("cancellation failed for order {order_id} on {symbol}: {cause}")]
    OrderCancellation {
        symbol: String,
        order_id: OrderId,
        cause: anyhow::Error,
    },
}

/// How a single cycle iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The pair was placed, held, and both cancellations attempted.
    Quoted {
        orders: OpenOrderPair,
        buy_cancelled: bool,
        sell_cancelled: bool,
    },
    /// The reference price lookup failed; nothing was placed.
    PriceLookupFailed,
    /// A placement failed. `resting` holds the id of a buy order left
    /// on the book when the sell side was the one rejected.
    PlacementFailed { resting: Option<OrderId> },
}

/// Quote cycle controller, generic over the exchange port.
///
/// Strictly sequential: one cycle at a time, one quote pair open at a
/// time. The configuration is immutable for the controller lifetime.
pub struct QuoteCycleController<E: ExchangeClient> {
    /// Exchange connectivity port.
    exchange: Arc<E>,
    /// Immutable quoting parameters.
    config: QuoteConfig,
    /// Shared metrics registry.
    metrics: Arc<MetricsRegistry>,
}

impl<E: ExchangeClient> QuoteCycleController<E> {
    /// Create a new controller.
    pub fn new(exchange: Arc<E>, config: QuoteConfig, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            exchange,
            config,
            metrics,
        }
    }

    /// Run the quote cycle indefinitely.
    ///
    /// Never returns under normal operation; the host process is
    /// expected to be terminated externally.
    #[instrument(skip(self), name = "quote_loop", fields(symbol = %self.config.symbol))]
    pub async fn run(&self) -> anyhow::Result<()> {
        info!(
            spread = %self.config.spread,
            order_qty = %self.config.order_qty,
            hold_secs = self.config.hold_duration_secs,
            "Starting quote cycle"
        );

        loop {
            self.run_cycle().await;
        }
    }

    /// Execute one full cycle: sample, place, hold, cancel.
    ///
    /// Failure paths sleep the retry backoff before returning, so the
    /// caller can loop over this without its own pacing.
    pub async fn run_cycle(&self) -> CycleOutcome {
        // Sample one reference price for this cycle.
        let reference = match self.exchange.reference_price(&self.config.symbol).await {
            Ok(price) => price,
            Err(cause) => {
                let step_err = CycleError::PriceLookup {
                    symbol: self.config.symbol.clone(),
                    cause,
                };
                error!(error = %step_err, "Price lookup failed");
                self.metrics.price_lookup_failures.inc();
                self.backoff().await;
                return CycleOutcome::PriceLookupFailed;
            }
        };
        self.metrics
            .reference_price
            .set(reference.to_f64().unwrap_or(0.0));

        // Quote around it and fire the buy first, then the sell.
        let quote = QuotePair::around(reference, self.config.spread, self.config.price_decimals);
        info!(
            reference = %reference,
            bid = %quote.bid,
            ask = %quote.ask,
            "Placing quote pair"
        );

        let Some(buy_id) = self.place(Side::Buy, quote.bid).await else {
            self.backoff().await;
            return CycleOutcome::PlacementFailed { resting: None };
        };

        let Some(sell_id) = self.place(Side::Sell, quote.ask).await else {
            // Known exposure: the resting buy is NOT cancelled here.
            warn!(
                buy_order_id = buy_id,
                "Buy order left resting after sell placement failure"
            );
            self.backoff().await;
            return CycleOutcome::PlacementFailed {
                resting: Some(buy_id),
            };
        };

        let orders = OpenOrderPair { buy_id, sell_id };

        // Let the pair rest. No order-status polling during the hold.
        debug!(
            buy_order_id = orders.buy_id,
            sell_order_id = orders.sell_id,
            hold_secs = self.config.hold_duration_secs,
            "Holding quote pair"
        );
        sleep(self.config.hold_duration()).await;

        // Cancel both ids independently; one failure never blocks the other.
        let buy_cancelled = self.cancel(orders.buy_id).await;
        let sell_cancelled = self.cancel(orders.sell_id).await;
        self.metrics.cycles_completed.inc();

        CycleOutcome::Quoted {
            orders,
            buy_cancelled,
            sell_cancelled,
        }
    }

    /// Place one side of the quote. Returns the order id, or `None`
    /// after logging and counting the failure.
    async fn place(&self, side: Side, price: Decimal) -> Option<OrderId> {
        let order = LimitOrder::gtc(
            self.config.symbol.clone(),
            side,
            self.config.order_qty,
            price,
        );
        let side_label = side.to_string();
        let started = Instant::now();

        match self.exchange.place_limit_order(&order).await {
            Ok(order_id) => {
                self.metrics
                    .orders_placed
                    .with_label_values(&[side_label.as_str()])
                    .inc();
                self.metrics
                    .order_latency_us
                    .with_label_values(&[side_label.as_str()])
                    .observe(started.elapsed().as_micros() as f64);
                info!(order_id, side = %side, price = %price, "Order resting");
                Some(order_id)
            }
            Err(cause) => {
                let step_err = CycleError::OrderPlacement {
                    symbol: self.config.symbol.clone(),
                    side,
                    cause,
                };
                error!(error = %step_err, "Order placement failed");
                self.metrics
                    .placement_failures
                    .with_label_values(&[side_label.as_str()])
                    .inc();
                None
            }
        }
    }

    /// Attempt to cancel one order. Returns whether the exchange
    /// acknowledged the cancellation.
    async fn cancel(&self, order_id: OrderId) -> bool {
        match self
            .exchange
            .cancel_order(&self.config.symbol, order_id)
            .await
        {
            Ok(()) => {
                self.metrics.orders_cancelled.inc();
                info!(order_id, "Order cancelled");
                true
            }
            Err(cause) => {
                let step_err = CycleError::OrderCancellation {
                    symbol: self.config.symbol.clone(),
                    order_id,
                    cause,
                };
                // Already-filled and already-cancelled orders land here too.
                warn!(error = %step_err, "Order cancellation failed");
                self.metrics.cancel_failures.inc();
                false
            }
        }
    }

    /// Fixed pause after a failed step. Linear, unlimited: no growth,
    /// no retry ceiling.
    async fn backoff(&self) {
        debug!(
            backoff_secs = self.config.retry_backoff_secs,
            "Backing off before next cycle"
        );
        sleep(self.config.retry_backoff()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_error_messages_carry_context() {
        let err = CycleError::PriceLookup {
            symbol: "BTCUSDT".to_string(),
            cause: anyhow::anyhow!("connection reset"),
        };
        assert_eq!(
            err.to_string(),
            "price lookup failed for BTCUSDT: connection reset"
        );

        let err = CycleError::OrderPlacement {
            symbol: "BTCUSDT".to_string(),
            side: Side::Sell,
            cause: anyhow::anyhow!("insufficient balance"),
        };
        assert_eq!(
            err.to_string(),
            "SELL order placement failed for BTCUSDT: insufficient balance"
        );

        let err = CycleError::OrderCancellation {
            symbol: "BTCUSDT".to_string(),
            order_id: 42,
            cause: anyhow::anyhow!("unknown order"),
        };
        assert_eq!(
            err.to_string(),
            "cancellation failed for order 42 on BTCUSDT: unknown order"
        );
    }
}
