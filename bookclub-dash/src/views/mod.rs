//! Derived dashboard views
//!
//! Pure functions over the in-memory pick list. Nothing here holds state;
//! every view is recomputed from `(picks, rotation, today)`.

use bookclub_common::{BookPick, Rotation, Slot};
use serde::Serialize;

pub mod cards;
pub mod schedule;
pub mod stats;

pub use cards::{pick_card, PickCard, PickForm};
pub use schedule::{full_schedule, schedule_entries, ScheduleRow, YearGroup};
pub use stats::{member_bars, stats, MemberBar, Stats};

/// Position of a slot relative to today, used for styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotTiming {
    Past,
    Current,
    Future,
}

impl SlotTiming {
    pub fn of(slot: Slot, today: Slot) -> Self {
        if slot == today {
            SlotTiming::Current
        } else if slot.is_before(today) {
            SlotTiming::Past
        } else {
            SlotTiming::Future
        }
    }
}

/// Everything the dashboard page renders
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub today: Slot,
    pub current: PickCard,
    pub next: PickCard,
    pub stats: Stats,
    pub members: Vec<MemberBar>,
    pub schedule: Vec<YearGroup>,
    /// Error from the last failed fetch, if the list shown is stale
    pub error: Option<String>,
}

pub fn build_dashboard(
    picks: &[BookPick],
    rotation: &Rotation,
    today: Slot,
    error: Option<String>,
) -> Dashboard {
    let entries = schedule_entries(picks, rotation, today);

    Dashboard {
        today,
        current: pick_card(cards::CURRENT_LABEL, today, picks, rotation),
        next: pick_card(cards::NEXT_LABEL, today.next(), picks, rotation),
        stats: stats(picks, rotation, today),
        members: member_bars(picks),
        schedule: full_schedule(&entries, today),
        error,
    }
}
