//! Binance Spot Adapter — ExchangeClient Port Implementation
//!
//! Implements the `ExchangeClient` port over the shared `RestClient`.
//! Reference prices come from the public `avgPrice` endpoint (the
//! rolling average, not the last trade); order placement and
//! cancellation go through the signed `/api/v3/order` endpoint.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Method;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::client::RestClient;
use super::types::{AvgPrice, CancelAck, OrderAck};
use crate::domain::order::{LimitOrder, OrderId};
use crate::ports::exchange::ExchangeClient;

/// Binance spot exchange client backed by the shared signed REST client.
///
/// Uses `RestClient` for all HTTP requests (inherits HMAC signing and
/// transport retries). Never creates its own reqwest client.
pub struct BinanceSpotClient {
    /// Shared REST client with auth + retry.
    client: Arc<RestClient>,
}

impl BinanceSpotClient {
    /// Create a new Binance spot client.
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExchangeClient for BinanceSpotClient {
    #[instrument(skip(self))]
    async fn reference_price(&self, symbol: &str) -> Result<Decimal> {
        let response = self
            .client
            .get_public("/api/v3/avgPrice", &[("symbol", symbol.to_string())])
            .await
            .context("Failed to fetch average price")?;

        let avg: AvgPrice = response
            .json()
            .await
            .context("Failed to decode avgPrice response")?;

        anyhow::ensure!(
            avg.price > Decimal::ZERO,
            "Exchange returned non-positive price {} for {symbol}",
            avg.price
        );

        debug!(price = %avg.price, window_mins = avg.mins, "Reference price sampled");
        Ok(avg.price)
    }

    #[instrument(
        skip(self, order),
        fields(symbol = %order.symbol, side = %order.side, price = %order.price)
    )]
    async fn place_limit_order(&self, order: &LimitOrder) -> Result<OrderId> {
        let client_order_id = Uuid::new_v4().simple().to_string();

        let params = [
            ("symbol", order.symbol.clone()),
            ("side", order.side.to_string()),
            ("type", "LIMIT".to_string()),
            ("timeInForce", order.time_in_force.to_string()),
            ("quantity", order.quantity.to_string()),
            ("price", order.price.to_string()),
            ("newClientOrderId", client_order_id),
            ("newOrderRespType", "ACK".to_string()),
        ];

        let response = self
            .client
            .send_signed(Method::POST, "/api/v3/order", &params)
            .await
            .context("Failed to place order")?;

        let ack: OrderAck = response
            .json()
            .await
            .context("Failed to decode order ack")?;

        info!(
            order_id = ack.order_id,
            client_order_id = %ack.client_order_id,
            transact_time = ack.transact_time,
            "Order placed"
        );
        Ok(ack.order_id)
    }

    #[instrument(skip(self))]
    async fn cancel_order(&self, symbol: &str, order_id: OrderId) -> Result<()> {
        let params = [
            ("symbol", symbol.to_string()),
            ("orderId", order_id.to_string()),
        ];

        let response = self
            .client
            .send_signed(Method::DELETE, "/api/v3/order", &params)
            .await
            .context("Failed to cancel order")?;

        let ack: CancelAck = response
            .json()
            .await
            .context("Failed to decode cancel ack")?;

        debug!(order_id = ack.order_id, status = %ack.status, "Cancel acknowledged");
        Ok(())
    }

    async fn ping(&self) -> bool {
        self.client.get_public("/api/v3/ping", &[]).await.is_ok()
    }
}
