//! Seed data access port trait.

use crate::domain::error::BourseError;
use crate::domain::stock::Stock;
use crate::domain::trade::Trade;

pub trait DataPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, BourseError>;

    fn load_trades(&self) -> Result<Vec<Trade>, BourseError>;
}
