//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fixed_clock::FixedClock;
use crate::adapters::system_clock::SystemClock;
use crate::domain::error::BourseError;
use crate::domain::market::Market;
use crate::domain::valuation::DEFAULT_TRADE_WINDOW_MINUTES;
use crate::ports::clock_port::ClockPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "minibourse", about = "In-memory stock exchange metrics engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load seed data, then print per-stock metrics and the all-share index
    Report {
        #[arg(short, long)]
        config: PathBuf,
        /// Trade window in minutes (overrides config)
        #[arg(short, long)]
        window: Option<i64>,
        /// Calculation instant, RFC 3339 (overrides config)
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Parse the seed data files and report what they contain
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing();
    match cli.command {
        Command::Report {
            config,
            window,
            as_of,
        } => run_report(&config, window, as_of.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BourseError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub stocks_path: PathBuf,
    pub trades_path: PathBuf,
    pub window_minutes: i64,
    /// Calculation instant for windowing; `None` means the wall clock.
    pub as_of: Option<DateTime<Utc>>,
}

pub fn build_report_config(adapter: &dyn ConfigPort) -> Result<ReportConfig, BourseError> {
    let stocks = adapter
        .get_string("data", "stocks")
        .ok_or_else(|| BourseError::ConfigMissing {
            section: "data".into(),
            key: "stocks".into(),
        })?;
    let trades = adapter
        .get_string("data", "trades")
        .ok_or_else(|| BourseError::ConfigMissing {
            section: "data".into(),
            key: "trades".into(),
        })?;

    let window_minutes = adapter.get_int("market", "window_minutes", DEFAULT_TRADE_WINDOW_MINUTES);
    if window_minutes <= 0 {
        return Err(BourseError::ConfigInvalid {
            section: "market".into(),
            key: "window_minutes".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let as_of = match adapter.get_string("market", "as_of") {
        Some(s) => Some(parse_as_of(&s)?),
        None => None,
    };

    Ok(ReportConfig {
        stocks_path: PathBuf::from(stocks),
        trades_path: PathBuf::from(trades),
        window_minutes,
        as_of,
    })
}

fn parse_as_of(value: &str) -> Result<DateTime<Utc>, BourseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| BourseError::ConfigInvalid {
            section: "market".into(),
            key: "as_of".into(),
            reason: "invalid timestamp (expected RFC 3339)".into(),
        })
}

pub fn run_report(
    config_path: &PathBuf,
    window_override: Option<i64>,
    as_of_override: Option<&str>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let mut report_config = match build_report_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if let Some(window) = window_override {
        report_config.window_minutes = window;
    }
    if let Some(as_of) = as_of_override {
        report_config.as_of = match parse_as_of(as_of) {
            Ok(instant) => Some(instant),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
    }

    if report_config.window_minutes <= 0 {
        let err = BourseError::InvalidWindow {
            minutes: report_config.window_minutes,
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    let data_port = CsvAdapter::new(
        report_config.stocks_path.clone(),
        report_config.trades_path.clone(),
    );
    let clock: Arc<dyn ClockPort + Send + Sync> = match report_config.as_of {
        Some(instant) => Arc::new(FixedClock::new(instant)),
        None => Arc::new(SystemClock::new()),
    };

    let market = Market::new(clock);
    if let Err(code) = seed_market(&market, &data_port) {
        return code;
    }

    print_report(&market, report_config.window_minutes)
}

/// Loads the seed files through the data port and registers their contents,
/// counting what the registries accept.
pub fn seed_market(market: &Market, data_port: &dyn DataPort) -> Result<(), ExitCode> {
    let stocks = match data_port.load_stocks() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    let mut accepted = 0usize;
    let mut rejected = 0usize;
    for stock in stocks {
        if market.add_stock(stock) {
            accepted += 1;
        } else {
            rejected += 1;
        }
    }
    eprintln!("Registered {} stocks ({} rejected)", accepted, rejected);

    let trades = match data_port.load_trades() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    let mut recorded = 0usize;
    let mut skipped = 0usize;
    for trade in trades {
        let symbol = trade.symbol.clone();
        match market.add_trade(&symbol, trade) {
            Ok(true) => recorded += 1,
            Ok(false) => skipped += 1,
            Err(e) => {
                eprintln!("warning: skipping trade for {} ({})", symbol, e);
                skipped += 1;
            }
        }
    }
    eprintln!("Recorded {} trades ({} skipped)", recorded, skipped);

    Ok(())
}

fn print_report(market: &Market, window_minutes: i64) -> ExitCode {
    eprintln!(
        "Calculating metrics over a {} minute trade window...",
        window_minutes
    );

    println!(
        "{:<8} {:<10} {:>14} {:>10} {:>12}",
        "symbol", "kind", "vwp", "yield", "pe"
    );

    for symbol in market.symbols() {
        let vwp = match market.volume_weighted_price(&symbol, Some(window_minutes)) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        let dividend_yield = match market.dividend_yield(&symbol, vwp) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        let pe_ratio = match market.pe_ratio(&symbol, vwp) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        let kind = match market.stock(&symbol) {
            Some(stock) => stock.kind.to_string(),
            None => continue,
        };

        println!(
            "{:<8} {:<10} {:>14} {:>10} {:>12}",
            symbol,
            kind,
            vwp.round_dp(4),
            dividend_yield.round_dp(4),
            pe_ratio.round_dp(4),
        );
    }

    match market.all_share_index() {
        Ok(index) => {
            println!();
            println!("All-share index: {}", index.round_dp(4));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating seed data listed in {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let report_config = match build_report_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvAdapter::new(report_config.stocks_path, report_config.trades_path);

    let stocks = match data_port.load_stocks() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("\nStocks ({}):", stocks.len());
    for stock in &stocks {
        eprintln!("  {} ({})", stock.symbol, stock.kind);
    }

    let trades = match data_port.load_trades() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("\nTrades: {}", trades.len());
    for trade in &trades {
        if !stocks.iter().any(|s| s.symbol == trade.symbol) {
            eprintln!(
                "  warning: trade at {} references unknown stock {}",
                trade.timestamp, trade.symbol
            );
        }
    }

    eprintln!("\nSeed data is valid.");
    ExitCode::SUCCESS
}
