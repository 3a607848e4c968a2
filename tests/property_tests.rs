//! Property-based tests for the liquidation math.
//!
//! These tests verify invariants hold under random inputs.

use perps_liquidation::*;
use primitive_types::U256;
use proptest::prelude::*;

// Strategies for generating test data
fn magnitude_strategy() -> impl Strategy<Value = u128> {
    1u128..=1_000_000_000_000_000_000_000_000u128 // 1 wei to 1e6 units
}

fn price_strategy() -> impl Strategy<Value = Price> {
    (1u128..=1_000_000_000_000_000_000_000u128).prop_map(Price::new_unchecked) // up to 1000
}

fn min_collateral_strategy() -> impl Strategy<Value = u128> {
    BASE..=3 * BASE // 1x to 3x
}

fn sign_strategy() -> impl Strategy<Value = Sign> {
    prop_oneof![Just(Sign::Positive), Just(Sign::Negative)]
}

fn balance_strategy() -> impl Strategy<Value = Balance> {
    (
        0u128..=1_000_000_000_000_000_000_000_000u128,
        sign_strategy(),
        0u128..=1_000_000_000_000_000_000_000_000u128,
        sign_strategy(),
    )
        .prop_map(|(margin, margin_sign, position, position_sign)| {
            Balance::new(
                SignedAmount::new(margin, margin_sign),
                SignedAmount::new(position, position_sign),
            )
        })
}

fn request_strategy() -> impl Strategy<Value = TradeRequest> {
    (
        0u128..=2_000_000_000_000_000_000_000_000u128,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(amount, is_buy, all_or_nothing)| TradeRequest {
            amount,
            is_buy,
            all_or_nothing,
        })
}

fn u256(x: u128) -> U256 {
    U256::from(x)
}

proptest! {
    /// More assets never turn an eligible account ineligible the other way round
    #[test]
    fn eligibility_monotonic_in_assets(
        low in magnitude_strategy(),
        extra in magnitude_strategy(),
        negative in magnitude_strategy(),
        min_collateral in min_collateral_strategy(),
    ) {
        let poorer = Valuation { positive: u256(low), negative: u256(negative) };
        let richer = Valuation { positive: u256(low) + u256(extra), negative: u256(negative) };

        if is_undercollateralized(&richer, min_collateral) {
            prop_assert!(is_undercollateralized(&poorer, min_collateral));
        }
        if !is_undercollateralized(&poorer, min_collateral) {
            prop_assert!(!is_undercollateralized(&richer, min_collateral));
        }
    }

    /// The widened compare agrees with exact arithmetic on small inputs
    #[test]
    fn eligibility_matches_exact_compare(
        positive in 0u64..=u64::MAX,
        negative in 0u64..=u64::MAX,
        min_collateral in min_collateral_strategy(),
    ) {
        let valuation = Valuation { positive: U256::from(positive), negative: U256::from(negative) };
        let expected = U256::from(positive) * U256::from(BASE)
            < U256::from(negative) * U256::from(min_collateral);
        prop_assert_eq!(is_undercollateralized(&valuation, min_collateral), expected);
    }

    /// Eligibility never panics or overflows at full width
    #[test]
    fn eligibility_total_at_extremes(
        margin in any::<u128>(),
        margin_sign in sign_strategy(),
        position in any::<u128>(),
        position_sign in sign_strategy(),
        price in 1u128..=u128::MAX,
        min_collateral in any::<u128>(),
    ) {
        let balance = Balance::new(
            SignedAmount::new(margin, margin_sign),
            SignedAmount::new(position, position_sign),
        );
        let _ = is_eligible(&balance, Price::new_unchecked(price), min_collateral);
    }

    /// A long with debt only gets safer as the price rises
    #[test]
    fn long_eligibility_monotonic_in_price(
        debt in magnitude_strategy(),
        size in magnitude_strategy(),
        low in price_strategy(),
        bump in 0u128..=1_000_000_000_000_000_000_000u128,
        min_collateral in min_collateral_strategy(),
    ) {
        let maker = Balance::new(SignedAmount::negative(debt), SignedAmount::positive(size));
        let high = Price::new_unchecked(low.value() + bump);

        if is_eligible(&maker, high, min_collateral) {
            prop_assert!(is_eligible(&maker, low, min_collateral));
        }
    }

    /// Close amount never exceeds the request or the maker's position
    #[test]
    fn close_amount_bounded(
        maker in balance_strategy(),
        request in request_strategy(),
    ) {
        if let Ok(result) = settle(&request, &maker, true) {
            prop_assert!(result.position_amount <= maker.position.magnitude());
            prop_assert!(result.position_amount <= request.amount);
            prop_assert!(result.margin_amount <= maker.margin.magnitude());
            prop_assert_eq!(result.is_buy, request.is_buy);
            prop_assert_eq!(result.trader_flag, TraderFlag::Liquidation);
        }
    }

    /// Settlement never reports overflow: the margin slice is bounded by the margin
    #[test]
    fn settlement_never_overflows(
        margin in any::<u128>(),
        position in 1u128..=u128::MAX,
        amount in any::<u128>(),
        is_buy in any::<bool>(),
    ) {
        let position = SignedAmount::new(position, Sign::from_positive(is_buy));
        let maker = Balance::new(SignedAmount::negative(margin), position);
        let request = TradeRequest { amount, is_buy, all_or_nothing: false };

        let result = settle(&request, &maker, true);
        prop_assert!(result.is_ok(), "unexpected rejection {:?}", result);
    }

    /// Closing a long leaves the maker at most as indebted per unit as before
    #[test]
    fn long_close_rounding_is_conservative(
        debt in magnitude_strategy(),
        size in magnitude_strategy(),
        amount in magnitude_strategy(),
    ) {
        let maker = Balance::new(SignedAmount::negative(debt), SignedAmount::positive(size));
        let result = settle(&TradeRequest::buy(amount), &maker, true).unwrap();
        let closed = result.position_amount;
        let taken = result.margin_amount;

        // remaining debt / remaining size <= debt / size
        prop_assert!(
            (u256(debt) - u256(taken)) * u256(size) <= u256(debt) * u256(size - closed),
            "long close left more debt per unit: taken {} of {} for {} of {}",
            taken, debt, closed, size
        );
        // and never rounds by more than one unit
        prop_assert!(u256(taken) * u256(size) < u256(debt) * u256(closed) + u256(size));
    }

    /// Closing a short leaves the maker at least as collateralized per unit
    #[test]
    fn short_close_rounding_is_conservative(
        collateral in magnitude_strategy(),
        size in magnitude_strategy(),
        amount in magnitude_strategy(),
    ) {
        let maker = Balance::new(SignedAmount::positive(collateral), SignedAmount::negative(size));
        let result = settle(&TradeRequest::sell(amount), &maker, true).unwrap();
        let closed = result.position_amount;
        let taken = result.margin_amount;

        // remaining collateral / remaining size >= collateral / size
        prop_assert!(
            (u256(collateral) - u256(taken)) * u256(size) >= u256(collateral) * u256(size - closed),
            "short close left less collateral per unit: taken {} of {} for {} of {}",
            taken, collateral, closed, size
        );
        prop_assert!(u256(taken) * u256(size) + u256(size) > u256(collateral) * u256(closed));
    }

    /// All-or-nothing requests larger than the position are always refused
    #[test]
    fn all_or_nothing_exact(
        maker in balance_strategy(),
        excess in 1u128..=1_000_000u128,
        is_buy in any::<bool>(),
    ) {
        let request = TradeRequest {
            amount: maker.position.magnitude() + excess,
            is_buy,
            all_or_nothing: true,
        };
        let result = settle(&request, &maker, true);
        prop_assert!(
            matches!(result, Err(LiquidationError::AllOrNothingUnsatisfiable { .. })),
            "expected all-or-nothing rejection, got {:?}",
            result
        );
    }

    /// Requests that would grow the maker's position are always refused
    #[test]
    fn direction_enforced(
        size in magnitude_strategy(),
        margin in magnitude_strategy(),
        maker_long in any::<bool>(),
        amount in 0u128..=1_000_000u128,
        eligible in any::<bool>(),
    ) {
        let maker = Balance::new(
            SignedAmount::new(margin, Sign::from_positive(!maker_long)),
            SignedAmount::new(size, Sign::from_positive(maker_long)),
        );
        let request = TradeRequest { amount, is_buy: !maker_long, all_or_nothing: false };

        let result = settle(&request, &maker, eligible);
        prop_assert!(result.is_err());
        if eligible {
            prop_assert!(
                matches!(result, Err(LiquidationError::DirectionMismatch { .. })),
                "expected direction mismatch, got {:?}",
                result
            );
        }
    }

    /// Rejections for solvent makers don't depend on the request
    #[test]
    fn ineligible_always_rejected(
        maker in balance_strategy(),
        request in request_strategy(),
    ) {
        prop_assert_eq!(settle(&request, &maker, false), Err(LiquidationError::NotEligible));
    }
}
