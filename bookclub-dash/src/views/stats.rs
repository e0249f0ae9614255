//! Aggregate statistics and per-member counts
//!
//! Only filled picks (title and author both present) count anywhere here.

use bookclub_common::{BookPick, Rotation, Slot};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Filled slots
    pub total_picks: usize,
    /// Rotation length
    pub members: usize,
    /// Filled slots strictly before today's
    pub picks_read: usize,
    /// Distinct authors among filled slots
    pub unique_authors: usize,
}

pub fn stats(picks: &[BookPick], rotation: &Rotation, today: Slot) -> Stats {
    let filled: Vec<&BookPick> = picks.iter().filter(|p| p.is_filled()).collect();

    let unique_authors = filled
        .iter()
        .filter_map(|p| p.filled_author())
        .collect::<HashSet<_>>()
        .len();

    Stats {
        total_picks: filled.len(),
        members: rotation.len(),
        picks_read: filled.iter().filter(|p| p.slot().is_before(today)).count(),
        unique_authors,
    }
}

/// One bar of the per-member chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberBar {
    pub member: String,
    pub count: usize,
    /// Width relative to the busiest member, 0..=100
    pub width_percent: f64,
}

/// Filled picks per member, busiest first
///
/// Ties keep first-appearance order. Widths are normalized against the
/// largest count, with a floor of 1 on the denominator.
pub fn member_bars(picks: &[BookPick]) -> Vec<MemberBar> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for pick in picks.iter().filter(|p| p.is_filled()) {
        match counts.iter_mut().find(|(member, _)| *member == pick.member) {
            Some((_, count)) => *count += 1,
            None => counts.push((pick.member.clone(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);

    counts
        .into_iter()
        .map(|(member, count)| MemberBar {
            member,
            count,
            width_percent: count as f64 / max_count as f64 * 100.0,
        })
        .collect()
}
