//! Wall-clock adapter.

use crate::ports::clock_port::ClockPort;
use chrono::{DateTime, Utc};

#[derive(Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
