//! Domain layer - Core quoting logic and models.
//!
//! Pure domain logic for the quote-cycle bot. No external I/O here
//! (hexagonal architecture inner ring); everything is testable in
//! isolation.

pub mod order;
pub mod quote;

// Re-export core types for convenience
pub use order::{LimitOrder, OpenOrderPair, OrderId, Side, TimeInForce};
pub use quote::QuotePair;
