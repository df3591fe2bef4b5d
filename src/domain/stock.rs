//! Stock entity and stock kinds.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::trade::Trade;

/// Stock kind, selecting the dividend-yield formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StockKind {
    #[default]
    Common,
    Preferred,
}

impl std::fmt::Display for StockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockKind::Common => write!(f, "common"),
            StockKind::Preferred => write!(f, "preferred"),
        }
    }
}

/// A registered stock: static dividend data, its trade history keyed by
/// timestamp, and the cached outputs of the valuation calculators.
///
/// The cached fields (`dividend_yield`, `pe_ratio`, `volume_weighted_price`)
/// start at zero and are overwritten by the corresponding calculator call.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stock {
    pub symbol: String,
    pub kind: StockKind,
    pub last_dividend: Decimal,
    /// Fraction of par value (0.02 = 2%). `None` makes the preferred yield zero.
    pub fixed_dividend: Option<Decimal>,
    pub par_value: Decimal,
    pub dividend_yield: Decimal,
    pub pe_ratio: Decimal,
    pub volume_weighted_price: Decimal,
    pub trades: BTreeMap<DateTime<Utc>, Trade>,
}

impl Stock {
    pub fn new(symbol: &str, kind: StockKind) -> Self {
        Stock {
            symbol: symbol.to_string(),
            kind,
            ..Stock::default()
        }
    }

    pub fn common(symbol: &str, last_dividend: Decimal, par_value: Decimal) -> Self {
        Stock {
            symbol: symbol.to_string(),
            kind: StockKind::Common,
            last_dividend,
            par_value,
            ..Stock::default()
        }
    }

    pub fn preferred(
        symbol: &str,
        last_dividend: Decimal,
        fixed_dividend: Decimal,
        par_value: Decimal,
    ) -> Self {
        Stock {
            symbol: symbol.to_string(),
            kind: StockKind::Preferred,
            last_dividend,
            fixed_dividend: Some(fixed_dividend),
            par_value,
            ..Stock::default()
        }
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }
}
