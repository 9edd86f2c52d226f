//! Prometheus Metrics Registry - Quoting Observability
//!
//! Registers and exposes Prometheus metrics for Grafana dashboards.
//! Covers cycle throughput, order counts per side, per-step failure
//! counts, and order placement latency.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use tokio::sync::broadcast;
use tracing::{info, instrument};

/// Centralized Prometheus metrics for the quote-cycle bot.
///
/// All metrics follow the naming convention `spread_bot_*`; order
/// metrics carry a `side` label.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Completed quote cycles (placed, held, and cancellation attempted).
    pub cycles_completed: IntCounter,
    /// Total orders placed counter.
    pub orders_placed: IntCounterVec,
    /// Total orders cancelled counter.
    pub orders_cancelled: IntCounter,
    /// Price lookup failures counter.
    pub price_lookup_failures: IntCounter,
    /// Order placement failures counter.
    pub placement_failures: IntCounterVec,
    /// Order cancellation failures counter.
    pub cancel_failures: IntCounter,
    /// Last sampled reference price gauge.
    pub reference_price: Gauge,
    /// Order placement latency histogram (microseconds).
    pub order_latency_us: HistogramVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let cycles_completed = IntCounter::new(
            "spread_bot_cycles_completed_total",
            "Quote cycles that reached the cancellation step",
        )?;

        let orders_placed = IntCounterVec::new(
            Opts::new("spread_bot_orders_placed_total", "Total orders placed"),
            &["side"],
        )?;

        let orders_cancelled = IntCounter::new(
            "spread_bot_orders_cancelled_total",
            "Total orders cancelled",
        )?;

        let price_lookup_failures = IntCounter::new(
            "spread_bot_price_lookup_failures_total",
            "Reference price lookups that failed",
        )?;

        let placement_failures = IntCounterVec::new(
            Opts::new(
                "spread_bot_placement_failures_total",
                "Order placements that failed",
            ),
            &["side"],
        )?;

        let cancel_failures = IntCounter::new(
            "spread_bot_cancel_failures_total",
            "Order cancellations that failed",
        )?;

        let reference_price = Gauge::new(
            "spread_bot_reference_price",
            "Last sampled reference price",
        )?;

        let order_latency_us = HistogramVec::new(
            HistogramOpts::new(
                "spread_bot_order_latency_us",
                "Order placement latency in microseconds",
            )
            .buckets(vec![
                1000.0, 5000.0, 10000.0, 50000.0, 100000.0, 500000.0, 1000000.0,
            ]),
            &["side"],
        )?;

        // Register all metrics
        registry.register(Box::new(cycles_completed.clone()))?;
        registry.register(Box::new(orders_placed.clone()))?;
        registry.register(Box::new(orders_cancelled.clone()))?;
        registry.register(Box::new(price_lookup_failures.clone()))?;
        registry.register(Box::new(placement_failures.clone()))?;
        registry.register(Box::new(cancel_failures.clone()))?;
        registry.register(Box::new(reference_price.clone()))?;
        registry.register(Box::new(order_latency_us.clone()))?;

        Ok(Self {
            registry,
            cycles_completed,
            orders_placed,
            orders_cancelled,
            price_lookup_failures,
            placement_failures,
            cancel_failures,
            reference_price,
            order_latency_us,
        })
    }

    /// Serve Prometheus metrics on the configured bind address.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve(
        self: Arc<Self>,
        bind_address: String,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let metrics_self = Arc::clone(&self);

        let app = Router::new().route(
            "/metrics",
            get(move || {
                let registry = metrics_self.registry.clone();
                async move {
                    let encoder = TextEncoder::new();
                    let metric_families = registry.gather();
                    let mut buffer = Vec::new();
                    encoder.encode(&metric_families, &mut buffer).unwrap_or_default();
                    String::from_utf8(buffer).unwrap_or_default()
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind(&bind_address).await?;
        info!(address = %bind_address, "Prometheus metrics server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds_and_counts() {
        let metrics = MetricsRegistry::new().unwrap();
        metrics.cycles_completed.inc();
        metrics.orders_placed.with_label_values(&["BUY"]).inc();
        metrics.orders_placed.with_label_values(&["SELL"]).inc();
        assert_eq!(metrics.cycles_completed.get(), 1);
        assert_eq!(metrics.orders_placed.with_label_values(&["BUY"]).get(), 1);
    }
}
