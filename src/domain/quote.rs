//! Quote pair computation.
//!
//! Derives the two-sided quote for a cycle: bid and ask straddling the
//! sampled reference price by half the configured spread on each side,
//! rounded outward to the exchange's price precision. Outward rounding
//! (bid toward −∞, ask toward +∞) keeps bid < reference < ask for every
//! positive spread and never narrows the quoted distance.

use rust_decimal::{Decimal, RoundingStrategy};

/// A two-sided quote derived from one reference price sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePair {
    /// The reference price the quote straddles.
    pub reference: Decimal,
    /// Bid price (our resting buy).
    pub bid: Decimal,
    /// Ask price (our resting sell).
    pub ask: Decimal,
}

impl QuotePair {
    /// Compute the quote pair around `reference` with the given total
    /// `spread`, rounded to `decimals` places of price precision.
    ///
    /// bid = reference − spread/2 rounded down, ask = reference + spread/2
    /// rounded up; both rescaled so they print with exactly `decimals`
    /// fractional digits.
    pub fn around(reference: Decimal, spread: Decimal, decimals: u32) -> Self {
        let half = spread / Decimal::TWO;

        let mut bid = (reference - half)
            .round_dp_with_strategy(decimals, RoundingStrategy::ToNegativeInfinity);
        let mut ask = (reference + half)
            .round_dp_with_strategy(decimals, RoundingStrategy::ToPositiveInfinity);
        bid.rescale(decimals);
        ask.rescale(decimals);

        Self {
            reference,
            bid,
            ask,
        }
    }

    /// Mid-price of the quoted pair.
    pub fn mid_price(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Quoted distance between ask and bid.
    pub fn quoted_spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Check that the quote is placeable: positive bid, uncrossed book.
    pub fn is_valid(&self) -> bool {
        self.bid > Decimal::ZERO && self.bid < self.ask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_50000_spread_20() {
        let quote = QuotePair::around(dec!(50000.00), dec!(20.0), 2);
        assert_eq!(quote.bid.to_string(), "49990.00");
        assert_eq!(quote.ask.to_string(), "50010.00");
        assert!(quote.is_valid());
    }

    #[test]
    fn test_straddles_reference() {
        let quote = QuotePair::around(dec!(117250.37), dec!(15.5), 2);
        assert!(quote.bid < quote.reference);
        assert!(quote.ask > quote.reference);
    }

    #[test]
    fn test_high_precision_reference_rescaled() {
        // avgPrice responses carry eight decimals; quotes must not
        let quote = QuotePair::around(dec!(50000.12345678), dec!(20.0), 2);
        assert_eq!(quote.bid.to_string(), "49990.12");
        assert_eq!(quote.ask.to_string(), "50010.13");
    }

    #[test]
    fn test_sub_tick_spread_stays_uncrossed() {
        let quote = QuotePair::around(dec!(100.00), dec!(0.001), 2);
        assert_eq!(quote.bid, dec!(99.99));
        assert_eq!(quote.ask, dec!(100.01));
        assert!(quote.bid < quote.reference && quote.reference < quote.ask);
    }

    #[test]
    fn test_outward_rounding_never_narrows() {
        let spread = dec!(0.05);
        let quote = QuotePair::around(dec!(250.333), spread, 2);
        assert!(quote.quoted_spread() >= spread);
    }

    #[test]
    fn test_mid_price_of_symmetric_quote() {
        let quote = QuotePair::around(dec!(2000.00), dec!(4.0), 2);
        assert_eq!(quote.mid_price(), dec!(2000.00));
    }

    #[test]
    fn test_invalid_when_spread_swallows_price() {
        // A spread wider than twice the reference drives the bid negative
        let quote = QuotePair::around(dec!(1.00), dec!(10.0), 2);
        assert!(!quote.is_valid());
    }
}
