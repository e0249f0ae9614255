//! Timestamp and clock utilities

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::schedule::Slot;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Source of "today" for slot derivation
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// Slot containing today
    fn current_slot(&self) -> Slot {
        Slot::from_date(&self.today())
    }
}

/// Wall-clock local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// First day of a slot's month
    pub fn at_slot(slot: Slot) -> Self {
        let date = NaiveDate::from_ymd_opt(slot.year, slot.month.index() as u32 + 1, 1)
            .unwrap_or_default();
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
