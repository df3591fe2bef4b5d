//! Core domain types and logic.

pub mod stock;
pub mod trade;
pub mod exchange;
pub mod registry;
pub mod decimal_math;
pub mod valuation;
pub mod index;
pub mod market;
pub mod error;
