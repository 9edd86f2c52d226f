//! Binance HTTP Client - Signed REST API Client
//!
//! Wraps reqwest with request signing and bounded transport-level
//! retries for all Binance REST interactions. Rejections (4xx) are
//! surfaced immediately with the decoded Binance error body; transport
//! failures, 429s and 5xx responses are retried with exponential delay
//! up to the configured attempt budget.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, Response, StatusCode};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::auth::BinanceAuth;
use super::types::ApiError;

/// Configuration for the Binance HTTP client.
#[derive(Debug, Clone)]
pub struct RestClientConfig {
    /// Base URL for the REST API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// recvWindow sent with every signed request (milliseconds).
    pub recv_window_ms: u64,
    /// Maximum retries on transient errors.
    pub max_retries: u32,
    /// Base delay between retries (exponential backoff).
    pub retry_base_delay: Duration,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://testnet.binance.vision".to_string(),
            timeout: Duration::from_secs(30),
            recv_window_ms: 5000,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(200),
        }
    }
}

/// Signed HTTP client for the Binance REST API.
pub struct RestClient {
    /// Underlying HTTP client.
    http: Client,
    /// Authentication manager.
    auth: Arc<BinanceAuth>,
    /// Client configuration.
    config: RestClientConfig,
}

impl RestClient {
    /// Create a new REST client.
    pub fn new(auth: Arc<BinanceAuth>, config: RestClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            auth,
            config,
        })
    }

    /// Execute an unsigned GET request (public market data endpoints).
    pub async fn get_public(&self, path: &str, params: &[(&str, String)]) -> Result<Response> {
        self.execute_with_retry(Method::GET, path, params, false)
            .await
    }

    /// Execute a signed request (private account/order endpoints).
    ///
    /// The query string is rebuilt on every attempt so each retry
    /// carries a fresh `timestamp` and signature.
    pub async fn send_signed(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Response> {
        self.execute_with_retry(method, path, params, true).await
    }

    async fn execute_with_retry(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        signed: bool,
    ) -> Result<Response> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
                debug!(attempt, delay_ms = delay.as_millis() as u64, "Retrying request");
                sleep(delay).await;
            }

            let query = if signed {
                self.signed_query(params)
            } else {
                Self::plain_query(params)
            };

            let url = if query.is_empty() {
                format!("{}{}", self.config.base_url, path)
            } else {
                format!("{}{}?{}", self.config.base_url, path, query)
            };

            let mut request = self.http.request(method.clone(), &url);
            if signed {
                request = request.header("X-MBX-APIKEY", self.auth.api_key());
            }

            match request.send().await {
                Ok(response) => match response.status() {
                    StatusCode::OK | StatusCode::CREATED => return Ok(response),
                    StatusCode::TOO_MANY_REQUESTS | StatusCode::IM_A_TEAPOT => {
                        // 418 is Binance's IP-ban escalation of 429
                        warn!(status = %response.status(), "Rate limited by Binance, backing off");
                        sleep(Duration::from_secs(2)).await;
                        last_error = Some(anyhow::anyhow!("Rate limited"));
                        continue;
                    }
                    status if status.is_server_error() => {
                        warn!(status = %status, "Server error, retrying");
                        last_error = Some(anyhow::anyhow!("Server error: {status}"));
                        continue;
                    }
                    status => {
                        let body = response.text().await.unwrap_or_default();
                        return Err(match serde_json::from_str::<ApiError>(&body) {
                            Ok(api_err) => anyhow::anyhow!(api_err.to_string()),
                            Err(_) => anyhow::anyhow!("API error {status}: {body}"),
                        });
                    }
                },
                Err(e) => {
                    warn!(error = %e, attempt, "Request failed");
                    last_error = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Max retries exceeded")))
    }

    /// Join params into a query string without signing.
    fn plain_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Join params, append recvWindow + timestamp, and sign the result.
    fn signed_query(&self, params: &[(&str, String)]) -> String {
        let mut query = Self::plain_query(params);
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!(
            "recvWindow={}&timestamp={}",
            self.config.recv_window_ms,
            BinanceAuth::timestamp_ms()
        ));
        let signature = self.auth.sign(&query);
        format!("{query}&signature={signature}")
    }
}
