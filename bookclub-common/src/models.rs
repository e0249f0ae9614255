//! Book pick records and schedule entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::schedule::{Month, Scheduled, Slot};

/// Store row id, either an identity integer or an opaque string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(id) => write!(f, "{}", id),
            RowId::Text(id) => f.write_str(id),
        }
    }
}

/// One row of the record store: the pick for a single (month, year) slot
///
/// Field names on the wire follow the store's `books` table, where the
/// title column is called `book`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPick {
    /// Store row id (absent until persisted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub month: Month,
    pub year: i32,
    /// Assigned picker; may be empty in raw store data
    #[serde(default, deserialize_with = "null_as_empty")]
    pub member: String,
    #[serde(rename = "book", default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Last modification, written on every upsert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl BookPick {
    /// Unfilled pick for a slot
    pub fn new(slot: Slot, member: impl Into<String>) -> Self {
        Self {
            id: None,
            month: slot.month,
            year: slot.year,
            member: member.into(),
            title: None,
            author: None,
            link: None,
            updated_at: None,
        }
    }

    /// Builder-style title/author setter
    pub fn with_book(mut self, title: impl Into<String>, author: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.author = Some(author.into());
        self
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.month, self.year)
    }

    /// Both title and author are present and non-empty
    pub fn is_filled(&self) -> bool {
        self.filled_title().is_some() && self.filled_author().is_some()
    }

    pub fn filled_title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn filled_author(&self) -> Option<&str> {
        non_empty(&self.author)
    }

    pub fn has_member(&self) -> bool {
        !self.member.is_empty()
    }
}

impl Scheduled for BookPick {
    fn slot(&self) -> Slot {
        BookPick::slot(self)
    }
}

/// A slot as shown on the dashboard
///
/// `Predicted` entries exist only for display and are never written to the
/// store unless a title and author are submitted for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleEntry {
    /// Committed row from the record store
    Stored(BookPick),
    /// Slot with no stored row and a predicted assignee
    Predicted { slot: Slot, member: String },
}

impl ScheduleEntry {
    pub fn slot(&self) -> Slot {
        match self {
            ScheduleEntry::Stored(pick) => pick.slot(),
            ScheduleEntry::Predicted { slot, .. } => *slot,
        }
    }

    pub fn member(&self) -> &str {
        match self {
            ScheduleEntry::Stored(pick) => &pick.member,
            ScheduleEntry::Predicted { member, .. } => member,
        }
    }

    pub fn pick(&self) -> Option<&BookPick> {
        match self {
            ScheduleEntry::Stored(pick) => Some(pick),
            ScheduleEntry::Predicted { .. } => None,
        }
    }

    pub fn is_predicted(&self) -> bool {
        matches!(self, ScheduleEntry::Predicted { .. })
    }

    /// Predicted entries are never filled
    pub fn is_filled(&self) -> bool {
        self.pick().is_some_and(BookPick::is_filled)
    }
}

impl Scheduled for ScheduleEntry {
    fn slot(&self) -> Slot {
        ScheduleEntry::slot(self)
    }
}
