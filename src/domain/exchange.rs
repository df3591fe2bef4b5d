//! Exchange entity: the registered stock universe and its cached index.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::stock::Stock;

/// The stock universe keyed by symbol, plus the cached all-share index.
/// Every key equals the symbol of the stock stored under it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exchange {
    pub stocks: HashMap<String, Stock>,
    pub all_share_index: Decimal,
}

impl Exchange {
    pub fn new() -> Self {
        Exchange::default()
    }

    pub fn stock(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.get(symbol)
    }

    pub fn stock_mut(&mut self, symbol: &str) -> Option<&mut Stock> {
        self.stocks.get_mut(symbol)
    }

    pub fn has_stock(&self, symbol: &str) -> bool {
        self.stocks.contains_key(symbol)
    }

    pub fn stock_count(&self) -> usize {
        self.stocks.len()
    }

    /// Registered symbols in lexical order.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.stocks.keys().cloned().collect();
        symbols.sort();
        symbols
    }
}
