//! Member rotation
//!
//! The club cycles through a fixed, ordered list of members, one per month.
//! Unassigned slots are predicted by offsetting from a known (slot, member)
//! anchor by the number of calendar months between the two slots.

use serde::Serialize;
use tracing::warn;

use crate::schedule::{months_between, normalized_mod, Slot};
use crate::{Error, Result};

/// Rotation used when the configuration file does not list members
pub const DEFAULT_MEMBERS: [&str; 9] = [
    "Tommy", "Brett", "Sampson", "Drew", "Parker", "Ian", "Ward", "Nick", "Sechler",
];

/// Fixed, ordered, non-empty list of participants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rotation {
    members: Vec<String>,
}

impl Rotation {
    /// Build a rotation; rejects an empty list and blank names
    pub fn new<I, S>(members: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: Vec<String> = members
            .into_iter()
            .map(|m| m.into().trim().to_string())
            .collect();

        if members.is_empty() {
            return Err(Error::Config("Member rotation must not be empty".to_string()));
        }
        if let Some(pos) = members.iter().position(|m| m.is_empty()) {
            return Err(Error::Config(format!(
                "Member rotation entry {} is blank",
                pos
            )));
        }

        Ok(Self { members })
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: construction rejects empty rotations
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// First member, used when nothing has been assigned yet
    pub fn first(&self) -> &str {
        &self.members[0]
    }

    pub fn index_of(&self, member: &str) -> Option<usize> {
        self.members.iter().position(|m| m == member)
    }

    /// Member at an arbitrary (possibly negative) offset, wrapping around
    pub fn member_at(&self, offset: i64) -> &str {
        &self.members[normalized_mod(offset, self.members.len())]
    }

    /// Predict who picks for `target`, given that `anchor_member` picked for `anchor`
    ///
    /// The anchor member's index advances by the signed month delta between
    /// the two slots. Rotation changes (members leaving or being reordered)
    /// are not modeled: an anchor member missing from the rotation is
    /// reported and the first member is returned.
    pub fn predict(&self, anchor: Slot, anchor_member: &str, target: Slot) -> String {
        let Some(anchor_index) = self.index_of(anchor_member) else {
            warn!(
                member = %anchor_member,
                slot = %anchor,
                "Anchor member is not part of the rotation; falling back to first member"
            );
            return self.first().to_string();
        };

        let delta = months_between(anchor, target);
        self.member_at(anchor_index as i64 + delta).to_string()
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            members: DEFAULT_MEMBERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}
