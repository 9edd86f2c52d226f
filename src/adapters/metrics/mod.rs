//! Metrics and Health Adapters
//!
//! Prometheus metrics export and HTTP health probes.
//!
//! - `prometheus`: metrics registry and /metrics endpoint
//! - `health`: /live and /ready probes

pub mod health;
pub mod prometheus;
