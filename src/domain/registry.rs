//! Stock and trade registration with first-writer-wins semantics.
//!
//! Rejections (blank symbols, mismatches, duplicate keys) are reported
//! through the boolean result plus a warning log, never as errors, so
//! callers branch on the outcome. Callers sharing an exchange across
//! threads must hold one gate across the whole check-then-insert sequence;
//! [`crate::domain::market::Market`] does exactly that, and the exclusive
//! borrow enforces it within a single call.

use tracing::warn;

use super::exchange::Exchange;
use super::stock::Stock;
use super::trade::Trade;

/// Insert `stock` under its symbol key. Returns false and leaves the
/// exchange untouched when the symbol is blank or already registered.
pub fn try_add_stock(exchange: &mut Exchange, stock: Stock) -> bool {
    if stock.symbol.trim().is_empty() {
        warn!("rejected stock with blank symbol");
        return false;
    }
    if exchange.stocks.contains_key(&stock.symbol) {
        warn!("rejected duplicate stock registration for {}", stock.symbol);
        return false;
    }
    exchange.stocks.insert(stock.symbol.clone(), stock);
    true
}

/// Insert `trade` under its timestamp key. Returns false and leaves the
/// stock untouched when the trade symbol is blank, does not match the
/// stock's symbol exactly, or a trade already exists at that timestamp.
pub fn try_add_trade(stock: &mut Stock, trade: Trade) -> bool {
    if trade.symbol.trim().is_empty() {
        warn!("rejected trade with blank symbol for stock {}", stock.symbol);
        return false;
    }
    if trade.symbol != stock.symbol {
        warn!(
            "rejected trade with symbol {} for stock {}",
            trade.symbol, stock.symbol
        );
        return false;
    }
    if stock.trades.contains_key(&trade.timestamp) {
        warn!(
            "rejected duplicate trade at {} for stock {}",
            trade.timestamp, stock.symbol
        );
        return false;
    }
    stock.trades.insert(trade.timestamp, trade);
    true
}
