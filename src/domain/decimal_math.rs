//! Natural logarithm and exponential over decimals.
//!
//! Thin fallible wrappers over [`rust_decimal::MathematicalOps`], used by the
//! all-share index calculation. Inputs outside a function's domain surface as
//! errors rather than panics.

use rust_decimal::{Decimal, MathematicalOps};
use tracing::error;

use super::error::BourseError;

/// Natural logarithm. Errors on inputs ≤ 0.
pub fn ln(value: Decimal) -> Result<Decimal, BourseError> {
    if value <= Decimal::ZERO {
        error!("cannot take the logarithm of non-positive value {}", value);
        return Err(BourseError::NonPositiveLogarithm { value });
    }
    value.checked_ln().ok_or_else(|| {
        error!("decimal overflow while computing ln of {}", value);
        BourseError::Overflow {
            operation: "ln".to_string(),
        }
    })
}

/// Natural exponential. Errors when the result exceeds the decimal range.
pub fn exp(value: Decimal) -> Result<Decimal, BourseError> {
    value.checked_exp().ok_or_else(|| {
        error!("decimal overflow while computing exp of {}", value);
        BourseError::Overflow {
            operation: "exp".to_string(),
        }
    })
}
