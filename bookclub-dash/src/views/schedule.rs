//! Full schedule grouped by year

use bookclub_common::{BookPick, Month, Rotation, ScheduleEntry, Slot};
use serde::Serialize;
use std::collections::BTreeMap;

use super::SlotTiming;
use crate::picks::entry_in;

/// Placeholder title for slots without a book yet
pub const UNFILLED_TITLE: &str = "Not yet selected";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub month: Month,
    pub abbrev: &'static str,
    pub year: i32,
    pub member: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub link: Option<String>,
    pub display_title: String,
    pub filled: bool,
    pub predicted: bool,
    pub timing: SlotTiming,
}

impl ScheduleRow {
    fn from_entry(entry: &ScheduleEntry, today: Slot) -> Self {
        let slot = entry.slot();
        let pick = entry.pick();
        let title = pick.and_then(BookPick::filled_title).map(str::to_string);
        let author = pick.and_then(BookPick::filled_author).map(str::to_string);

        Self {
            month: slot.month,
            abbrev: slot.month.abbrev(),
            year: slot.year,
            member: entry.member().to_string(),
            // A title alone is displayed even though the row stays unfilled
            display_title: title.clone().unwrap_or_else(|| UNFILLED_TITLE.to_string()),
            title,
            author,
            link: pick.and_then(|p| p.link.clone()),
            filled: entry.is_filled(),
            predicted: entry.is_predicted(),
            timing: SlotTiming::of(slot, today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearGroup {
    pub year: i32,
    pub rows: Vec<ScheduleRow>,
}

/// Stored rows plus predicted entries for today's and next month's slots
/// when those have no stored row
pub fn schedule_entries(
    picks: &[BookPick],
    rotation: &Rotation,
    today: Slot,
) -> Vec<ScheduleEntry> {
    let mut entries: Vec<ScheduleEntry> =
        picks.iter().cloned().map(ScheduleEntry::Stored).collect();

    for slot in [today, today.next()] {
        if !picks.iter().any(|p| p.slot() == slot) {
            entries.push(entry_in(picks, rotation, slot));
        }
    }

    entries
}

/// Group entries by year (newest year first), months descending within a year
///
/// The sort is stable, so entries sharing a slot keep their input order.
pub fn full_schedule(entries: &[ScheduleEntry], today: Slot) -> Vec<YearGroup> {
    let mut by_year: BTreeMap<i32, Vec<&ScheduleEntry>> = BTreeMap::new();
    for entry in entries {
        by_year.entry(entry.slot().year).or_default().push(entry);
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, mut year_entries)| {
            year_entries.sort_by(|a, b| b.slot().month.index().cmp(&a.slot().month.index()));
            YearGroup {
                year,
                rows: year_entries
                    .into_iter()
                    .map(|e| ScheduleRow::from_entry(e, today))
                    .collect(),
            }
        })
        .collect()
}
