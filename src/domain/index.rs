//! Exchange-wide all-share index: the geometric mean of every stock's
//! cached volume-weighted price.

use rust_decimal::Decimal;
use tracing::error;

use super::decimal_math;
use super::error::BourseError;
use super::exchange::Exchange;
use super::stock::Stock;

/// Geometric mean of all cached volume-weighted prices, computed in log
/// space as `exp(sum(ln(vwp)) / n)`.
///
/// An empty exchange indexes at zero. Stocks aggregate in symbol order, and
/// the first one whose cached price is not strictly positive fails the whole
/// calculation with that symbol named. The cached index is only overwritten
/// on success.
pub fn all_share_index(exchange: &mut Exchange) -> Result<Decimal, BourseError> {
    if exchange.stock_count() == 0 {
        exchange.all_share_index = Decimal::ZERO;
        return Ok(Decimal::ZERO);
    }

    let mut stocks: Vec<&Stock> = exchange.stocks.values().collect();
    stocks.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let mut log_sum = Decimal::ZERO;
    for stock in &stocks {
        if stock.volume_weighted_price <= Decimal::ZERO {
            error!(
                "non-positive volume-weighted price {} for stock {}",
                stock.volume_weighted_price, stock.symbol
            );
            return Err(BourseError::NonPositiveVwp {
                symbol: stock.symbol.clone(),
                value: stock.volume_weighted_price,
            });
        }
        log_sum = log_sum
            .checked_add(decimal_math::ln(stock.volume_weighted_price)?)
            .ok_or_else(overflow)?;
    }

    let log_mean = log_sum
        .checked_div(Decimal::from(stocks.len() as u64))
        .ok_or_else(overflow)?;
    let value = decimal_math::exp(log_mean)?;

    exchange.all_share_index = value;
    Ok(value)
}

fn overflow() -> BourseError {
    error!("decimal overflow while computing the all-share index");
    BourseError::Overflow {
        operation: "all-share index".to_string(),
    }
}
