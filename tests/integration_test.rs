//! Engine integration tests.
//!
//! Tests cover:
//! - Stock and trade registration through the market facade
//! - The calculation matrix for common and preferred stocks
//! - The P/E-after-yield sequencing contract
//! - Trade window boundary selection
//! - Error-level logging on calculation faults
//! - All-share index aggregation and its failure modes
//! - A full seed-to-index flow over a five-stock roster

mod common;

use chrono::Duration;
use common::*;
use minibourse::domain::error::BourseError;
use minibourse::domain::market::Market;
use rust_decimal_macros::dec;

/// The five-stock roster the trade log in `data/` is written against.
fn register_roster(market: &Market) {
    assert!(market.add_stock(Stock::common("TEA", dec!(0), dec!(100))));
    assert!(market.add_stock(Stock::common("POP", dec!(8), dec!(100))));
    assert!(market.add_stock(Stock::common("ALE", dec!(23), dec!(60))));
    assert!(market.add_stock(Stock::preferred("GIN", dec!(8), dec!(0.02), dec!(100))));
    assert!(market.add_stock(Stock::common("JOE", dec!(13), dec!(250))));
}

mod registration {
    use super::*;

    #[test]
    fn roster_registers_each_symbol_once() {
        let market = fixed_market();
        register_roster(&market);

        assert_eq!(market.stock_count(), 5);
        assert_eq!(market.symbols(), vec!["ALE", "GIN", "JOE", "POP", "TEA"]);
    }

    #[test]
    fn duplicate_registration_is_rejected_and_original_kept() {
        let market = fixed_market();
        register_roster(&market);

        assert!(!market.add_stock(Stock::common("POP", dec!(99), dec!(1))));
        assert_eq!(market.stock("POP").unwrap().last_dividend, dec!(8));
        assert_eq!(market.stock_count(), 5);
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let market = fixed_market();
        assert!(!market.add_stock(Stock::common("  ", dec!(1), dec!(100))));
        assert_eq!(market.stock_count(), 0);
    }
}

mod trading {
    use super::*;

    #[test]
    fn trades_accumulate_per_symbol() {
        let market = fixed_market();
        register_roster(&market);

        assert!(market.add_trade("TEA", make_trade("TEA", 1, 10, dec!(99))).unwrap());
        assert!(market.add_trade("TEA", make_trade("TEA", 2, 20, dec!(98))).unwrap());
        assert!(market.add_trade("POP", make_trade("POP", 1, 5, dec!(101))).unwrap());

        assert_eq!(market.stock("TEA").unwrap().trade_count(), 2);
        assert_eq!(market.stock("POP").unwrap().trade_count(), 1);
        assert_eq!(market.stock("ALE").unwrap().trade_count(), 0);
    }

    #[test]
    fn trade_for_unregistered_symbol_is_an_error() {
        let market = fixed_market();
        let err = market.add_trade("RUM", make_trade("RUM", 1, 5, dec!(10))).unwrap_err();
        assert!(matches!(err, BourseError::StockNotFound { symbol } if symbol == "RUM"));
    }

    #[test]
    fn mismatched_trade_symbol_is_rejected_not_faulted() {
        let market = fixed_market();
        register_roster(&market);

        let accepted = market.add_trade("TEA", make_trade("POP", 1, 5, dec!(10))).unwrap();
        assert!(!accepted);
        assert_eq!(market.stock("TEA").unwrap().trade_count(), 0);
    }
}

mod valuation_matrix {
    use super::*;

    #[test]
    fn common_yields_at_reference_price() {
        let market = fixed_market();
        register_roster(&market);

        assert_eq!(market.dividend_yield("TEA", dec!(50)).unwrap(), dec!(0));
        assert_eq!(market.dividend_yield("POP", dec!(50)).unwrap(), dec!(0.16));
        assert_eq!(market.dividend_yield("ALE", dec!(50)).unwrap(), dec!(0.46));
        assert_eq!(market.dividend_yield("JOE", dec!(50)).unwrap(), dec!(0.26));
    }

    #[test]
    fn preferred_yield_uses_fixed_dividend_over_par() {
        let market = fixed_market();
        register_roster(&market);

        // 0.02 * 100 / 50
        assert_eq!(market.dividend_yield("GIN", dec!(50)).unwrap(), dec!(0.04));
    }

    #[test]
    fn pe_ratio_follows_computed_yield() {
        let market = fixed_market();
        register_roster(&market);

        market.dividend_yield("POP", dec!(50)).unwrap();
        assert_eq!(market.pe_ratio("POP", dec!(50)).unwrap(), dec!(312.5));
    }

    #[test]
    fn zero_yield_gives_zero_pe() {
        let market = fixed_market();
        register_roster(&market);

        market.dividend_yield("TEA", dec!(50)).unwrap();
        assert_eq!(market.pe_ratio("TEA", dec!(50)).unwrap(), dec!(0));
    }
}

mod sequencing {
    use super::*;

    #[test]
    fn pe_before_yield_reads_the_zero_default() {
        let market = fixed_market();
        register_roster(&market);

        assert_eq!(market.pe_ratio("POP", dec!(50)).unwrap(), dec!(0));

        market.dividend_yield("POP", dec!(50)).unwrap();
        assert_eq!(market.pe_ratio("POP", dec!(50)).unwrap(), dec!(312.5));
    }

    #[test]
    fn pe_reads_the_most_recent_yield() {
        let market = fixed_market();
        register_roster(&market);

        market.dividend_yield("POP", dec!(50)).unwrap();
        market.dividend_yield("POP", dec!(100)).unwrap();
        // Cached yield is now 0.08, so 50 / 0.08 = 625.
        assert_eq!(market.pe_ratio("POP", dec!(50)).unwrap(), dec!(625));
    }
}

mod trade_window {
    use super::*;

    #[test]
    fn both_window_bounds_are_inclusive() {
        let market = fixed_market();
        register_roster(&market);

        market
            .add_trade("TEA", trade_at("TEA", base_time(), 1, dec!(100)))
            .unwrap();
        market
            .add_trade(
                "TEA",
                trade_at("TEA", base_time() - Duration::minutes(5), 1, dec!(200)),
            )
            .unwrap();

        assert_eq!(market.volume_weighted_price("TEA", Some(5)).unwrap(), dec!(150));
    }

    #[test]
    fn one_second_past_the_window_is_excluded() {
        let market = fixed_market();
        register_roster(&market);

        market
            .add_trade(
                "TEA",
                trade_at(
                    "TEA",
                    base_time() - Duration::minutes(5) - Duration::seconds(1),
                    1,
                    dec!(900),
                ),
            )
            .unwrap();
        market.add_trade("TEA", make_trade("TEA", 1, 1, dec!(100))).unwrap();

        assert_eq!(market.volume_weighted_price("TEA", Some(5)).unwrap(), dec!(100));
    }

    #[test]
    fn empty_window_prices_at_zero() {
        let market = fixed_market();
        register_roster(&market);

        assert_eq!(market.volume_weighted_price("TEA", Some(5)).unwrap(), dec!(0));
    }

    #[test]
    fn non_positive_window_is_invalid() {
        let market = fixed_market();
        register_roster(&market);

        let err = market.volume_weighted_price("TEA", Some(0)).unwrap_err();
        assert!(matches!(err, BourseError::InvalidWindow { minutes: 0 }));
    }

    #[test]
    fn zero_quantity_trade_in_window_faults() {
        let market = fixed_market();
        register_roster(&market);

        market.add_trade("TEA", make_trade("TEA", 1, 0, dec!(100))).unwrap();
        let err = market.volume_weighted_price("TEA", Some(5)).unwrap_err();
        assert!(matches!(err, BourseError::ZeroQuantityTrade { symbol } if symbol == "TEA"));
    }

    #[test]
    fn oversized_window_selects_the_full_history() {
        let market = fixed_market();
        register_roster(&market);

        market.add_trade("TEA", make_trade("TEA", 1, 1, dec!(100))).unwrap();
        // Ten hours back, far outside the default window.
        market.add_trade("TEA", make_trade("TEA", 600, 1, dec!(300))).unwrap();

        // Both windows reach past the representable time range; the window
        // start clamps instead of panicking.
        for minutes in [139_000_000_000, i64::MAX] {
            assert_eq!(
                market.volume_weighted_price("TEA", Some(minutes)).unwrap(),
                dec!(200)
            );
        }
    }
}

mod fault_logging {
    use super::*;

    #[test]
    fn calculation_faults_are_logged_as_errors() {
        let market = fixed_market();
        register_roster(&market);
        market.add_trade("TEA", make_trade("TEA", 1, 0, dec!(100))).unwrap();

        let logs = capture_error_logs(|| {
            assert!(market.volume_weighted_price("TEA", Some(5)).is_err());
            assert!(market.all_share_index().is_err());
        });

        assert!(
            logs.contains("zero quantity trade"),
            "missing zero-quantity fault log, got: {logs}"
        );
        assert!(
            logs.contains("non-positive volume-weighted price"),
            "missing index fault log, got: {logs}"
        );
    }
}

mod all_share_index {
    use super::*;

    #[test]
    fn geometric_mean_of_three_known_prices() {
        let market = fixed_market();
        for (symbol, price) in [("TEA", dec!(100)), ("POP", dec!(200)), ("ALE", dec!(300))] {
            market.add_stock(Stock::common(symbol, dec!(0), dec!(100)));
            market.add_trade(symbol, make_trade(symbol, 1, 1, price)).unwrap();
            market.volume_weighted_price(symbol, None).unwrap();
        }

        let index = market.all_share_index().unwrap();
        let error = (index - dec!(181.7120592832)).abs();
        assert!(error < dec!(0.001), "index {index} too far from 181.712");
    }

    #[test]
    fn empty_market_indexes_at_zero() {
        let market = fixed_market();
        assert_eq!(market.all_share_index().unwrap(), dec!(0));
    }

    #[test]
    fn unpriced_stock_fails_the_index_by_name() {
        let market = fixed_market();
        register_roster(&market);

        let err = market.all_share_index().unwrap_err();
        // Aggregation runs in symbol order, so ALE is hit first.
        assert!(matches!(err, BourseError::NonPositiveVwp { symbol, .. } if symbol == "ALE"));
    }
}

mod full_flow {
    use super::*;

    #[test]
    fn seed_price_and_index_the_whole_roster() {
        let market = fixed_market();
        register_roster(&market);

        let fills = [
            ("TEA", 5, 120, dec!(98.75)),
            ("TEA", 3, 80, dec!(99.40)),
            ("POP", 4, 50, dec!(101.00)),
            ("POP", 2, 150, dec!(102.50)),
            ("ALE", 4, 40, dec!(58.20)),
            ("ALE", 1, 60, dec!(59.10)),
            ("GIN", 3, 25, dec!(120.25)),
            ("GIN", 1, 35, dec!(119.80)),
            ("JOE", 2, 90, dec!(247.00)),
            ("JOE", 1, 110, dec!(249.50)),
        ];
        for (symbol, minutes_ago, quantity, price) in fills {
            assert!(market
                .add_trade(symbol, make_trade(symbol, minutes_ago, quantity, price))
                .unwrap());
        }

        let mut prices = Vec::new();
        for symbol in market.symbols() {
            let vwp = market.volume_weighted_price(&symbol, None).unwrap();
            assert!(vwp > dec!(0), "{symbol} must price inside the window");
            market.dividend_yield(&symbol, vwp).unwrap();
            market.pe_ratio(&symbol, vwp).unwrap();
            prices.push(vwp);
        }

        // Spot-check one weighted average: (120 * 98.75 + 80 * 99.40) / 200.
        assert_eq!(market.stock("TEA").unwrap().volume_weighted_price, dec!(99.01));

        let index = market.all_share_index().unwrap();
        let min = prices.iter().min().unwrap();
        let max = prices.iter().max().unwrap();
        assert!(
            index >= *min && index <= *max,
            "geometric mean {index} outside [{min}, {max}]"
        );
    }
}
