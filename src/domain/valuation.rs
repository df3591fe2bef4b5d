//! Per-stock valuation metrics: dividend yield, P/E ratio, and
//! volume-weighted price over a trailing trade window.
//!
//! Each calculator overwrites the stock's corresponding cached field and
//! returns the value.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::error;

use super::error::BourseError;
use super::stock::{Stock, StockKind};

/// Trailing trade window applied when the caller does not supply one.
pub const DEFAULT_TRADE_WINDOW_MINUTES: i64 = 5;

/// Dividend yield at the given price.
///
/// Common stock yields `last_dividend / price`; preferred stock yields
/// `fixed_dividend * par_value / price`. A zero price yields zero, as does
/// a preferred stock with no fixed dividend.
pub fn dividend_yield(stock: &mut Stock, price: Decimal) -> Result<Decimal, BourseError> {
    let value = match stock.kind {
        StockKind::Common => {
            if price.is_zero() {
                Decimal::ZERO
            } else {
                stock
                    .last_dividend
                    .checked_div(price)
                    .ok_or_else(|| overflow("dividend yield"))?
            }
        }
        StockKind::Preferred => match stock.fixed_dividend {
            Some(fixed) if !price.is_zero() => fixed
                .checked_mul(stock.par_value)
                .and_then(|dividend| dividend.checked_div(price))
                .ok_or_else(|| overflow("dividend yield"))?,
            _ => Decimal::ZERO,
        },
    };
    stock.dividend_yield = value;
    Ok(value)
}

/// Price over the stock's cached dividend yield; zero when that yield is zero.
///
/// Order-dependent: this reads whatever `dividend_yield` currently holds, so
/// calling it before [`dividend_yield`] has run for this stock returns zero.
pub fn pe_ratio(stock: &mut Stock, price: Decimal) -> Result<Decimal, BourseError> {
    let value = if stock.dividend_yield.is_zero() {
        Decimal::ZERO
    } else {
        price
            .checked_div(stock.dividend_yield)
            .ok_or_else(|| overflow("P/E ratio"))?
    };
    stock.pe_ratio = value;
    Ok(value)
}

/// Quantity-weighted average price over trades with
/// `now - window <= timestamp <= now`, both bounds inclusive.
///
/// An empty window yields zero. A selected trade with zero quantity is a
/// fault, not a silent zero. A window reaching past the representable time
/// range selects every recorded trade.
pub fn volume_weighted_price(
    stock: &mut Stock,
    now: DateTime<Utc>,
    window_minutes: i64,
) -> Result<Decimal, BourseError> {
    if window_minutes <= 0 {
        return Err(BourseError::InvalidWindow {
            minutes: window_minutes,
        });
    }

    let start = Duration::try_minutes(window_minutes)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut value_sum = Decimal::ZERO;
    let mut quantity_sum: i64 = 0;
    let mut selected_any = false;

    for trade in stock.trades.range(start..=now).map(|(_, trade)| trade) {
        if trade.quantity == 0 {
            error!(
                "zero quantity trade at {} for stock {}",
                trade.timestamp, stock.symbol
            );
            return Err(BourseError::ZeroQuantityTrade {
                symbol: stock.symbol.clone(),
            });
        }
        selected_any = true;

        let trade_value = trade
            .price
            .checked_mul(Decimal::from(trade.quantity))
            .ok_or_else(|| overflow("volume-weighted price"))?;
        value_sum = value_sum
            .checked_add(trade_value)
            .ok_or_else(|| overflow("volume-weighted price"))?;
        quantity_sum = quantity_sum
            .checked_add(trade.quantity)
            .ok_or_else(|| overflow("volume-weighted price"))?;
    }

    let value = if !selected_any {
        Decimal::ZERO
    } else {
        // A zero quantity sum is only reachable with out-of-contract negative
        // quantities; it surfaces as the same zero-quantity division fault.
        value_sum
            .checked_div(Decimal::from(quantity_sum))
            .ok_or_else(|| {
                error!("zero quantity sum across the window for stock {}", stock.symbol);
                BourseError::ZeroQuantityTrade {
                    symbol: stock.symbol.clone(),
                }
            })?
    };
    stock.volume_weighted_price = value;
    Ok(value)
}

fn overflow(operation: &str) -> BourseError {
    error!("decimal overflow while computing {}", operation);
    BourseError::Overflow {
        operation: operation.to_string(),
    }
}
