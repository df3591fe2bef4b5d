//! Fixed-instant clock adapter, used when replaying recorded trade data.

use crate::ports::clock_port::ClockPort;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
