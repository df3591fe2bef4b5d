//! Thread-safe facade over one exchange: registration, trade capture, and
//! the calculators behind a single mutual-exclusion gate.

use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use super::error::BourseError;
use super::exchange::Exchange;
use super::index;
use super::registry;
use super::stock::Stock;
use super::trade::Trade;
use super::valuation;
use crate::ports::clock_port::ClockPort;

/// Shared handle to an exchange.
///
/// One gate serializes every operation, so a check-then-insert can never
/// race another writer and calculator writes to a stock's cached fields
/// never interleave. The clock is read before the gate is taken; nothing
/// blocks while holding it.
pub struct Market {
    exchange: Mutex<Exchange>,
    clock: Arc<dyn ClockPort + Send + Sync>,
}

impl Market {
    pub fn new(clock: Arc<dyn ClockPort + Send + Sync>) -> Self {
        Market {
            exchange: Mutex::new(Exchange::new()),
            clock,
        }
    }

    /// Registers a stock. Returns `false` (with a logged warning) on a
    /// blank symbol or an already-registered one; the first registration
    /// wins and is never overwritten.
    pub fn add_stock(&self, stock: Stock) -> bool {
        let mut exchange = self.exchange.lock();
        registry::try_add_stock(&mut exchange, stock)
    }

    /// Records a trade against the stock registered under `symbol`.
    ///
    /// An unknown symbol is an error; a rejected trade (blank or mismatched
    /// trade symbol, duplicate timestamp) returns `Ok(false)` with a logged
    /// warning.
    pub fn add_trade(&self, symbol: &str, trade: Trade) -> Result<bool, BourseError> {
        let mut exchange = self.exchange.lock();
        let stock = exchange
            .stock_mut(symbol)
            .ok_or_else(|| not_found(symbol))?;
        Ok(registry::try_add_trade(stock, trade))
    }

    /// Dividend yield for `symbol` at `price`; caches the result on the stock.
    pub fn dividend_yield(&self, symbol: &str, price: Decimal) -> Result<Decimal, BourseError> {
        let mut exchange = self.exchange.lock();
        let stock = exchange
            .stock_mut(symbol)
            .ok_or_else(|| not_found(symbol))?;
        valuation::dividend_yield(stock, price)
    }

    /// P/E ratio for `symbol` at `price`, read off the cached dividend
    /// yield; caches the result on the stock.
    pub fn pe_ratio(&self, symbol: &str, price: Decimal) -> Result<Decimal, BourseError> {
        let mut exchange = self.exchange.lock();
        let stock = exchange
            .stock_mut(symbol)
            .ok_or_else(|| not_found(symbol))?;
        valuation::pe_ratio(stock, price)
    }

    /// Volume-weighted price for `symbol` over the trailing window, ending
    /// at the clock's current time; caches the result on the stock.
    ///
    /// `window_minutes` defaults to
    /// [`valuation::DEFAULT_TRADE_WINDOW_MINUTES`] when absent.
    pub fn volume_weighted_price(
        &self,
        symbol: &str,
        window_minutes: Option<i64>,
    ) -> Result<Decimal, BourseError> {
        let now = self.clock.now();
        let window = window_minutes.unwrap_or(valuation::DEFAULT_TRADE_WINDOW_MINUTES);

        let mut exchange = self.exchange.lock();
        let stock = exchange
            .stock_mut(symbol)
            .ok_or_else(|| not_found(symbol))?;
        valuation::volume_weighted_price(stock, now, window)
    }

    /// All-share index over every registered stock's cached
    /// volume-weighted price; caches the result on the exchange.
    pub fn all_share_index(&self) -> Result<Decimal, BourseError> {
        let mut exchange = self.exchange.lock();
        index::all_share_index(&mut exchange)
    }

    /// Point-in-time snapshot of one stock, or `None` if unregistered.
    pub fn stock(&self, symbol: &str) -> Option<Stock> {
        self.exchange.lock().stock(symbol).cloned()
    }

    /// Registered symbols in sorted order.
    pub fn symbols(&self) -> Vec<String> {
        self.exchange.lock().symbols()
    }

    pub fn stock_count(&self) -> usize {
        self.exchange.lock().stock_count()
    }
}

fn not_found(symbol: &str) -> BourseError {
    BourseError::StockNotFound {
        symbol: symbol.to_string(),
    }
}
