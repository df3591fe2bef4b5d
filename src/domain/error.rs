//! Domain error types.

use rust_decimal::Decimal;

/// Top-level error type for minibourse.
///
/// Validation rejections (duplicate keys, blank or mismatched symbols) are
/// never errors; the registries report those through their boolean results.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BourseError {
    #[error("no stock registered under symbol {symbol}")]
    StockNotFound { symbol: String },

    #[error("trade window must be positive, got {minutes} minutes")]
    InvalidWindow { minutes: i64 },

    #[error("stock {symbol} has a trade with zero quantity inside the window")]
    ZeroQuantityTrade { symbol: String },

    #[error("decimal overflow while computing {operation}")]
    Overflow { operation: String },

    #[error("stock {symbol} has non-positive volume-weighted price {value}")]
    NonPositiveVwp { symbol: String, value: Decimal },

    #[error("cannot take the logarithm of non-positive value {value}")]
    NonPositiveLogarithm { value: Decimal },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data load error: {reason}")]
    DataLoad { reason: String },
}

impl From<&BourseError> for std::process::ExitCode {
    fn from(err: &BourseError) -> Self {
        let code: u8 = match err {
            BourseError::ConfigParse { .. }
            | BourseError::ConfigMissing { .. }
            | BourseError::ConfigInvalid { .. } => 2,
            BourseError::DataLoad { .. } => 3,
            BourseError::StockNotFound { .. } | BourseError::InvalidWindow { .. } => 4,
            BourseError::ZeroQuantityTrade { .. }
            | BourseError::Overflow { .. }
            | BourseError::NonPositiveVwp { .. }
            | BourseError::NonPositiveLogarithm { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
