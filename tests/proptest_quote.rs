//! Property-Based Tests — Quote Math Invariants
//!
//! Uses `proptest` to verify that quote derivation maintains its
//! invariants across random reference prices and spreads. Inputs are
//! generated in integer cents so every case is exactly representable
//! at the exchange's two-decimal price precision.

use proptest::prelude::*;
use rust_decimal::Decimal;

use binance_spread_bot::domain::quote::QuotePair;

proptest! {
    /// The quote must straddle the reference for every positive spread.
    #[test]
    fn quote_straddles_reference(
        price_cents in 1_000i64..10_000_000_000,
        spread_cents in 1i64..100_000,
    ) {
        let reference = Decimal::new(price_cents, 2);
        let spread = Decimal::new(spread_cents, 2);
        let quote = QuotePair::around(reference, spread, 2);

        prop_assert!(quote.bid < reference, "bid {} >= reference {}", quote.bid, reference);
        prop_assert!(quote.ask > reference, "ask {} <= reference {}", quote.ask, reference);
    }

    /// Outward rounding may widen the quoted distance, never narrow it.
    #[test]
    fn quoted_spread_never_narrower_than_configured(
        price_cents in 1_000i64..10_000_000_000,
        spread_cents in 1i64..100_000,
    ) {
        let reference = Decimal::new(price_cents, 2);
        let spread = Decimal::new(spread_cents, 2);
        let quote = QuotePair::around(reference, spread, 2);

        prop_assert!(
            quote.quoted_spread() >= spread,
            "quoted spread {} narrower than configured {}",
            quote.quoted_spread(),
            spread
        );
    }

    /// For tick-aligned references the two half-spreads round identically,
    /// so the quote stays symmetric around the reference.
    #[test]
    fn quote_symmetric_for_tick_aligned_reference(
        price_cents in 1_000i64..10_000_000_000,
        spread_cents in 1i64..100_000,
    ) {
        let reference = Decimal::new(price_cents, 2);
        let spread = Decimal::new(spread_cents, 2);
        let quote = QuotePair::around(reference, spread, 2);

        prop_assert_eq!(reference - quote.bid, quote.ask - reference);
    }

    /// Quoted prices always carry exactly the configured precision.
    #[test]
    fn quote_prices_carry_two_decimals(
        price_cents in 1_000i64..10_000_000_000,
        spread_cents in 1i64..100_000,
    ) {
        let reference = Decimal::new(price_cents, 2);
        let spread = Decimal::new(spread_cents, 2);
        let quote = QuotePair::around(reference, spread, 2);

        prop_assert_eq!(quote.bid.scale(), 2);
        prop_assert_eq!(quote.ask.scale(), 2);
    }
}
