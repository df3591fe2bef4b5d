#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use minibourse::adapters::fixed_clock::FixedClock;
use minibourse::domain::error::BourseError;
use minibourse::domain::market::Market;
pub use minibourse::domain::stock::Stock;
pub use minibourse::domain::trade::{Trade, TradeDirection};
use minibourse::ports::data_port::DataPort;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

pub struct MockDataPort {
    pub stocks: Vec<Stock>,
    pub trades: Vec<Trade>,
    pub stocks_error: Option<String>,
    pub trades_error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            trades: Vec::new(),
            stocks_error: None,
            trades_error: None,
        }
    }

    pub fn with_stocks(mut self, stocks: Vec<Stock>) -> Self {
        self.stocks = stocks;
        self
    }

    pub fn with_trades(mut self, trades: Vec<Trade>) -> Self {
        self.trades = trades;
        self
    }

    pub fn with_stocks_error(mut self, reason: &str) -> Self {
        self.stocks_error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, BourseError> {
        if let Some(reason) = &self.stocks_error {
            return Err(BourseError::DataLoad {
                reason: reason.clone(),
            });
        }
        Ok(self.stocks.clone())
    }

    fn load_trades(&self) -> Result<Vec<Trade>, BourseError> {
        if let Some(reason) = &self.trades_error {
            return Err(BourseError::DataLoad {
                reason: reason.clone(),
            });
        }
        Ok(self.trades.clone())
    }
}

/// Calculation instant every fixed-clock test anchors to.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 21, 10, 5, 0).unwrap()
}

/// Market whose clock is pinned to [`base_time`].
pub fn fixed_market() -> Market {
    Market::new(Arc::new(FixedClock::new(base_time())))
}

/// Buy trade `minutes_ago` minutes before [`base_time`].
pub fn make_trade(symbol: &str, minutes_ago: i64, quantity: i64, price: Decimal) -> Trade {
    trade_at(symbol, base_time() - Duration::minutes(minutes_ago), quantity, price)
}

pub fn trade_at(symbol: &str, timestamp: DateTime<Utc>, quantity: i64, price: Decimal) -> Trade {
    Trade {
        symbol: symbol.to_string(),
        timestamp,
        quantity,
        price,
        direction: TradeDirection::Buy,
    }
}

/// `ExitCode` exposes no accessor, so compare Debug forms against the
/// success constant's.
pub fn is_success(code: ExitCode) -> bool {
    format!("{code:?}") == format!("{:?}", ExitCode::SUCCESS)
}

/// Runs `f` under a subscriber that collects error-level log output, and
/// returns what was written.
pub fn capture_error_logs<F: FnOnce()>(f: F) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .without_time()
        .with_writer(LogBuffer(Arc::clone(&buffer)))
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.lock().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[derive(Clone)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
