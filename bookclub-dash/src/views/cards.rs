//! Current and next pick cards

use bookclub_common::{BookPick, Month, Rotation, ScheduleEntry, Slot};
use serde::Serialize;

use crate::picks::entry_in;

pub const CURRENT_LABEL: &str = "Currently Reading";
pub const NEXT_LABEL: &str = "Next Up";

/// Initial state of the inline create/edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickForm {
    pub month: Month,
    pub year: i32,
    pub member: String,
    pub title: String,
    pub author: String,
    /// Editing an existing filled pick rather than creating one
    pub is_edit: bool,
}

/// Card for a single slot: filled book details or a creation form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickCard {
    pub label: &'static str,
    pub slot: Slot,
    pub member: String,
    pub filled: bool,
    pub entry: ScheduleEntry,
    pub form: PickForm,
}

pub fn pick_card(
    label: &'static str,
    slot: Slot,
    picks: &[BookPick],
    rotation: &Rotation,
) -> PickCard {
    let entry = entry_in(picks, rotation, slot);
    let member = entry.member().to_string();
    let filled = entry.is_filled();

    let (title, author) = match entry.pick() {
        Some(pick) => (
            pick.title.clone().unwrap_or_default(),
            pick.author.clone().unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };

    PickCard {
        label,
        slot,
        form: PickForm {
            month: slot.month,
            year: slot.year,
            member: member.clone(),
            title,
            author,
            is_edit: filled,
        },
        member,
        filled,
        entry,
    }
}
