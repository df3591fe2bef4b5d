//! Trade event representation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Buy or sell side. Recorded for data completeness; no current formula
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "buy"),
            TradeDirection::Sell => write!(f, "sell"),
        }
    }
}

/// A single trade event. The timestamp is the unique key within a stock's
/// trade collection; quantity is expected to be positive, but a zero value
/// only faults at calculation time, not at insertion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub quantity: i64,
    pub price: Decimal,
    pub direction: TradeDirection,
}
