//! Binance REST API Adapter
//!
//! Implements the HTTP client for the Binance spot REST API. Handles
//! request signing, order placement, cancellation, and reference price
//! sampling.
//!
//! Sub-modules:
//! - `auth`: HMAC-SHA256 query-string signing
//! - `client`: HTTP client with transport retries
//! - `exchange`: `ExchangeClient` port implementation
//! - `types`: API response type definitions

pub mod auth;
pub mod client;
pub mod exchange;
pub mod types;
