//! Schedule model
//!
//! Canonical month ordering, (month, year) slots and the chronological
//! comparisons used everywhere a list of picks is sorted.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Calendar months in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// All twelve months, January first
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Position in canonical order (January = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Month at a canonical position, `None` outside 0..=11
    pub fn from_index(index: usize) -> Option<Month> {
        MONTHS.get(index).copied()
    }

    /// Full English name, as stored in the record store
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter abbreviation ("Jan", "Feb", ...)
    pub fn abbrev(self) -> &'static str {
        &self.name()[..3]
    }

    /// Following month, wrapping December to January
    pub fn succ(self) -> Month {
        MONTHS[(self.index() + 1) % MONTHS.len()]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MONTHS
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown month name: {:?}", s)))
    }
}

/// Position of a month name in canonical order
///
/// Names must match exactly ("March", not "march"). Unknown names yield `None`.
pub fn month_index(name: &str) -> Option<usize> {
    name.parse::<Month>().ok().map(Month::index)
}

/// A (month, year) position in the rotation schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub month: Month,
    pub year: i32,
}

impl Slot {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// Slot containing a calendar date
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            month: MONTHS[date.month0() as usize],
            year: date.year(),
        }
    }

    /// Slot immediately following this one
    pub fn next(self) -> Slot {
        next_slot(self.month, self.year)
    }

    /// True when this slot lies strictly before `other`
    pub fn is_before(self, other: Slot) -> bool {
        compare_chronological(&self, &other) == Ordering::Less
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_chronological(self, other)
    }
}

/// Anything that occupies a schedule slot
pub trait Scheduled {
    fn slot(&self) -> Slot;
}

impl Scheduled for Slot {
    fn slot(&self) -> Slot {
        *self
    }
}

/// Oldest first: year, then month index
pub fn compare_chronological<T: Scheduled + ?Sized>(a: &T, b: &T) -> Ordering {
    let (a, b) = (a.slot(), b.slot());
    a.year
        .cmp(&b.year)
        .then_with(|| a.month.index().cmp(&b.month.index()))
}

/// Newest first: year descending, then month index descending
pub fn compare_chronological_desc<T: Scheduled + ?Sized>(a: &T, b: &T) -> Ordering {
    compare_chronological(b, a)
}

/// Stable descending sort (newest first). Equal slots keep their relative order.
pub fn sort_newest_first<T: Scheduled>(items: &mut [T]) {
    items.sort_by(compare_chronological_desc);
}

/// Slot after (month, year); December rolls over to January of the next year
pub fn next_slot(month: Month, year: i32) -> Slot {
    match month {
        Month::December => Slot::new(Month::January, year + 1),
        other => Slot::new(other.succ(), year),
    }
}

/// Signed number of calendar months from `from` to `to`
pub fn months_between(from: Slot, to: Slot) -> i64 {
    (i64::from(to.year) - i64::from(from.year)) * 12
        + (to.month.index() as i64 - from.month.index() as i64)
}

/// `((x % k) + k) % k`: remainder always in `0..k`
///
/// `k` must be non-zero.
pub fn normalized_mod(x: i64, k: usize) -> usize {
    debug_assert!(k > 0, "normalized_mod with zero modulus");
    let k = k as i64;
    (((x % k) + k) % k) as usize
}
