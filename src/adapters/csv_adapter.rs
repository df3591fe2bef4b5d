//! CSV seed data adapter.
//!
//! Reads the stock roster (`symbol,kind,last_dividend,fixed_dividend,par_value`)
//! and the trade log (`symbol,timestamp,quantity,price,direction`). An empty
//! `fixed_dividend` field means the stock has none.

use crate::domain::error::BourseError;
use crate::domain::stock::{Stock, StockKind};
use crate::domain::trade::{Trade, TradeDirection};
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    stocks_path: PathBuf,
    trades_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(stocks_path: PathBuf, trades_path: PathBuf) -> Self {
        Self {
            stocks_path,
            trades_path,
        }
    }

    fn parse_kind(value: &str) -> Option<StockKind> {
        match value.to_lowercase().as_str() {
            "common" => Some(StockKind::Common),
            "preferred" => Some(StockKind::Preferred),
            _ => None,
        }
    }

    fn parse_direction(value: &str) -> Option<TradeDirection> {
        match value.to_lowercase().as_str() {
            "buy" => Some(TradeDirection::Buy),
            "sell" => Some(TradeDirection::Sell),
            _ => None,
        }
    }
}

impl DataPort for CsvAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, BourseError> {
        let content = fs::read_to_string(&self.stocks_path).map_err(|e| BourseError::DataLoad {
            reason: format!("failed to read {}: {}", self.stocks_path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut stocks = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BourseError::DataLoad {
                reason: format!("CSV parse error: {}", e),
            })?;

            let symbol = record.get(0).ok_or_else(|| BourseError::DataLoad {
                reason: "missing symbol column".into(),
            })?;

            let kind_str = record.get(1).ok_or_else(|| BourseError::DataLoad {
                reason: "missing kind column".into(),
            })?;
            let kind = Self::parse_kind(kind_str).ok_or_else(|| BourseError::DataLoad {
                reason: format!("invalid kind value: {}", kind_str),
            })?;

            let last_dividend: Decimal = record
                .get(2)
                .ok_or_else(|| BourseError::DataLoad {
                    reason: "missing last_dividend column".into(),
                })?
                .parse()
                .map_err(|e| BourseError::DataLoad {
                    reason: format!("invalid last_dividend value: {}", e),
                })?;

            let fixed_str = record.get(3).ok_or_else(|| BourseError::DataLoad {
                reason: "missing fixed_dividend column".into(),
            })?;
            let fixed_dividend = if fixed_str.is_empty() {
                None
            } else {
                Some(fixed_str.parse::<Decimal>().map_err(|e| {
                    BourseError::DataLoad {
                        reason: format!("invalid fixed_dividend value: {}", e),
                    }
                })?)
            };

            let par_value: Decimal = record
                .get(4)
                .ok_or_else(|| BourseError::DataLoad {
                    reason: "missing par_value column".into(),
                })?
                .parse()
                .map_err(|e| BourseError::DataLoad {
                    reason: format!("invalid par_value value: {}", e),
                })?;

            stocks.push(Stock {
                symbol: symbol.to_string(),
                kind,
                last_dividend,
                fixed_dividend,
                par_value,
                ..Stock::default()
            });
        }

        stocks.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(stocks)
    }

    fn load_trades(&self) -> Result<Vec<Trade>, BourseError> {
        let content = fs::read_to_string(&self.trades_path).map_err(|e| BourseError::DataLoad {
            reason: format!("failed to read {}: {}", self.trades_path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut trades = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BourseError::DataLoad {
                reason: format!("CSV parse error: {}", e),
            })?;

            let symbol = record.get(0).ok_or_else(|| BourseError::DataLoad {
                reason: "missing symbol column".into(),
            })?;

            let timestamp_str = record.get(1).ok_or_else(|| BourseError::DataLoad {
                reason: "missing timestamp column".into(),
            })?;
            let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| BourseError::DataLoad {
                    reason: format!("invalid timestamp format: {}", e),
                })?;

            let quantity: i64 = record
                .get(2)
                .ok_or_else(|| BourseError::DataLoad {
                    reason: "missing quantity column".into(),
                })?
                .parse()
                .map_err(|e| BourseError::DataLoad {
                    reason: format!("invalid quantity value: {}", e),
                })?;

            let price: Decimal = record
                .get(3)
                .ok_or_else(|| BourseError::DataLoad {
                    reason: "missing price column".into(),
                })?
                .parse()
                .map_err(|e| BourseError::DataLoad {
                    reason: format!("invalid price value: {}", e),
                })?;

            let direction_str = record.get(4).ok_or_else(|| BourseError::DataLoad {
                reason: "missing direction column".into(),
            })?;
            let direction =
                Self::parse_direction(direction_str).ok_or_else(|| BourseError::DataLoad {
                    reason: format!("invalid direction value: {}", direction_str),
                })?;

            trades.push(Trade {
                symbol: symbol.to_string(),
                timestamp,
                quantity,
                price,
                direction,
            });
        }

        trades.sort_by_key(|t| t.timestamp);
        Ok(trades)
    }
}
