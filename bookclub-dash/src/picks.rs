//! Data-access layer
//!
//! `PickBook` keeps the last fetched list of picks in memory, sorted newest
//! first, and derives everything the dashboard needs from it: slot lookup,
//! assignee prediction and the current/next slots.
//!
//! Store failures never escape this layer. A failed fetch keeps the stale
//! list and records an error string; a failed submit returns `false`.

use bookclub_common::schedule::{compare_chronological, sort_newest_first};
use bookclub_common::time::{self, Clock, SystemClock};
use bookclub_common::{BookPick, Month, Rotation, ScheduleEntry, Slot};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::store::RecordStore;

#[derive(Debug, Default)]
struct PickState {
    picks: Vec<BookPick>,
    error: Option<String>,
}

/// In-memory view of the record store plus the member rotation
pub struct PickBook {
    store: Arc<dyn RecordStore>,
    rotation: Rotation,
    clock: Arc<dyn Clock>,
    state: RwLock<PickState>,
}

impl PickBook {
    /// Pick book using the system clock
    pub fn new(store: Arc<dyn RecordStore>, rotation: Rotation) -> Self {
        Self::with_clock(store, rotation, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn RecordStore>,
        rotation: Rotation,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            rotation,
            clock,
            state: RwLock::new(PickState::default()),
        }
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Fetch every row and replace the in-memory list
    ///
    /// Returns the sorted rows, or an empty list on failure. On failure the
    /// previous in-memory list is left untouched and the error is recorded.
    pub async fn load_all(&self) -> Vec<BookPick> {
        match self.store.select_all().await {
            Ok(mut picks) => {
                sort_newest_first(&mut picks);
                debug!(store = self.store.name(), count = picks.len(), "Loaded book picks");

                let mut state = self.state.write().await;
                state.picks = picks.clone();
                state.error = None;
                picks
            }
            Err(e) => {
                error!(store = self.store.name(), "Error fetching book picks: {}", e);
                self.state.write().await.error = Some(e.to_string());
                Vec::new()
            }
        }
    }

    /// Upsert a pick for (month, year) and reload on success
    ///
    /// No validation happens here; callers decide whether empty titles or
    /// authors are acceptable. On failure the in-memory list is unchanged.
    pub async fn submit(
        &self,
        month: Month,
        year: i32,
        member: &str,
        title: &str,
        author: &str,
        link: Option<&str>,
    ) -> bool {
        let slot = Slot::new(month, year);
        let mut pick = BookPick::new(slot, member).with_book(title, author);
        pick.link = link.filter(|l| !l.is_empty()).map(str::to_string);
        pick.updated_at = Some(time::now());

        match self.store.upsert(&pick).await {
            Ok(saved) => {
                info!(
                    slot = %slot,
                    member = %saved.member,
                    title = saved.title.as_deref().unwrap_or_default(),
                    "Saved book pick"
                );
                self.load_all().await;
                true
            }
            Err(e) => {
                error!(slot = %slot, "Error submitting book pick: {}", e);
                false
            }
        }
    }

    /// Stored row for (month, year), if any
    pub async fn find_slot(&self, month: Month, year: i32) -> Option<BookPick> {
        let target = Slot::new(month, year);
        self.state
            .read()
            .await
            .picks
            .iter()
            .find(|p| p.slot() == target)
            .cloned()
    }

    /// Member assigned to (month, year), stored or predicted
    pub async fn predict_member(&self, month: Month, year: i32) -> String {
        let state = self.state.read().await;
        predict_member_in(&state.picks, &self.rotation, Slot::new(month, year))
    }

    /// `Stored` when a row exists for the slot, otherwise `Predicted`
    pub async fn entry_for(&self, slot: Slot) -> ScheduleEntry {
        let state = self.state.read().await;
        entry_in(&state.picks, &self.rotation, slot)
    }

    /// Today's slot from the clock
    pub fn current_slot(&self) -> Slot {
        self.clock.current_slot()
    }

    /// Slot immediately after today's
    pub fn next_slot_after_current(&self) -> Slot {
        self.current_slot().next()
    }

    /// Copy of the in-memory list, newest first
    pub async fn snapshot(&self) -> Vec<BookPick> {
        self.state.read().await.picks.clone()
    }

    /// Error from the most recent failed fetch, cleared by a successful one
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }
}

/// Predict the member for `target` from a list of stored picks
///
/// A stored row for the slot wins. Otherwise the most recent row with a
/// member anchors the rotation. With no such row, the first member picks.
pub fn predict_member_in(picks: &[BookPick], rotation: &Rotation, target: Slot) -> String {
    if let Some(existing) = picks.iter().find(|p| p.slot() == target) {
        return existing.member.clone();
    }

    let anchor = picks
        .iter()
        .filter(|p| p.has_member())
        .reduce(|newest, p| {
            if compare_chronological(p, newest).is_gt() {
                p
            } else {
                newest
            }
        });

    match anchor {
        Some(anchor) => rotation.predict(anchor.slot(), &anchor.member, target),
        None => rotation.first().to_string(),
    }
}

/// Schedule entry for `slot` from a list of stored picks
pub fn entry_in(picks: &[BookPick], rotation: &Rotation, slot: Slot) -> ScheduleEntry {
    match picks.iter().find(|p| p.slot() == slot) {
        Some(pick) => ScheduleEntry::Stored(pick.clone()),
        None => ScheduleEntry::Predicted {
            slot,
            member: predict_member_in(picks, rotation, slot),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use bookclub_common::time::FixedClock;

    fn rotation() -> Rotation {
        Rotation::new(["Tommy", "Brett", "Sampson"]).unwrap()
    }

    fn book_with(store: Arc<MemoryStore>, today: Slot) -> PickBook {
        PickBook::with_clock(store, rotation(), Arc::new(FixedClock::at_slot(today)))
    }

    #[test]
    fn test_predict_from_anchor_forward_and_backward() {
        let picks = vec![BookPick::new(Slot::new(Month::March, 2024), "Brett")];
        let rotation = rotation();

        assert_eq!(
            predict_member_in(&picks, &rotation, Slot::new(Month::June, 2024)),
            "Brett"
        );
        assert_eq!(
            predict_member_in(&picks, &rotation, Slot::new(Month::January, 2024)),
            "Sampson"
        );
    }

    #[test]
    fn test_predict_prefers_stored_row() {
        let picks = vec![
            BookPick::new(Slot::new(Month::March, 2024), "Brett"),
            BookPick::new(Slot::new(Month::April, 2024), "Tommy"),
        ];
        assert_eq!(
            predict_member_in(&picks, &rotation(), Slot::new(Month::April, 2024)),
            "Tommy"
        );
    }

    #[test]
    fn test_predict_uses_most_recent_member_regardless_of_order() {
        let picks = vec![
            BookPick::new(Slot::new(Month::January, 2024), "Tommy"),
            BookPick::new(Slot::new(Month::May, 2024), "Sampson"),
            BookPick::new(Slot::new(Month::March, 2024), "Tommy"),
        ];
        // Anchor is May (Sampson, index 2); July is 2 months later
        assert_eq!(
            predict_member_in(&picks, &rotation(), Slot::new(Month::July, 2024)),
            "Brett"
        );
    }

    #[test]
    fn test_predict_skips_rows_without_member() {
        let picks = vec![
            BookPick::new(Slot::new(Month::June, 2024), ""),
            BookPick::new(Slot::new(Month::March, 2024), "Brett"),
        ];
        assert_eq!(
            predict_member_in(&picks, &rotation(), Slot::new(Month::April, 2024)),
            "Sampson"
        );
    }

    #[test]
    fn test_predict_with_no_members_returns_first() {
        assert_eq!(
            predict_member_in(&[], &rotation(), Slot::new(Month::April, 2024)),
            "Tommy"
        );
    }

    #[tokio::test]
    async fn test_load_all_sorts_newest_first() {
        let store = Arc::new(MemoryStore::with_rows(vec![
            BookPick::new(Slot::new(Month::January, 2024), "Tommy"),
            BookPick::new(Slot::new(Month::December, 2023), "Sampson"),
            BookPick::new(Slot::new(Month::March, 2024), "Sampson"),
        ]));
        let book = book_with(store, Slot::new(Month::March, 2024));

        let picks = book.load_all().await;
        let slots: Vec<Slot> = picks.iter().map(BookPick::slot).collect();
        assert_eq!(
            slots,
            vec![
                Slot::new(Month::March, 2024),
                Slot::new(Month::January, 2024),
                Slot::new(Month::December, 2023),
            ]
        );
        assert!(book.error().await.is_none());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_stale_list_and_reports_error() {
        let store = Arc::new(MemoryStore::with_rows(vec![BookPick::new(
            Slot::new(Month::January, 2024),
            "Tommy",
        )]));
        let book = book_with(store.clone(), Slot::new(Month::March, 2024));
        assert_eq!(book.load_all().await.len(), 1);

        store.set_fail_reads(true);
        assert!(book.load_all().await.is_empty());
        assert!(book.error().await.is_some());
        assert_eq!(book.snapshot().await.len(), 1);

        store.set_fail_reads(false);
        book.load_all().await;
        assert!(book.error().await.is_none());
    }

    #[tokio::test]
    async fn test_submit_creates_then_updates_single_row() {
        let store = Arc::new(MemoryStore::new());
        let book = book_with(store.clone(), Slot::new(Month::March, 2024));

        assert!(book.submit(Month::April, 2024, "Brett", "Dune", "Frank Herbert", None).await);
        assert_eq!(store.len(), 1);

        assert!(book.submit(Month::April, 2024, "Brett", "Emma", "Jane Austen", None).await);
        assert_eq!(store.len(), 1);

        let pick = book.find_slot(Month::April, 2024).await.unwrap();
        assert_eq!(pick.title.as_deref(), Some("Emma"));
        assert_eq!(pick.author.as_deref(), Some("Jane Austen"));
        assert!(pick.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_submit_failure_leaves_state_untouched() {
        let store = Arc::new(MemoryStore::with_rows(vec![BookPick::new(
            Slot::new(Month::January, 2024),
            "Tommy",
        )]));
        let book = book_with(store.clone(), Slot::new(Month::March, 2024));
        book.load_all().await;

        store.set_fail_writes(true);
        let ok = book.submit(Month::March, 2024, "Sampson", "Dune", "Frank Herbert", None).await;

        assert!(!ok);
        assert_eq!(book.snapshot().await.len(), 1);
        assert!(book.find_slot(Month::March, 2024).await.is_none());
    }

    #[tokio::test]
    async fn test_submit_stores_link_and_drops_empty_link() {
        let store = Arc::new(MemoryStore::new());
        let book = book_with(store, Slot::new(Month::March, 2024));

        let link = Some("https://example.org/dune");
        book.submit(Month::May, 2024, "Brett", "Dune", "Frank Herbert", link).await;
        book.submit(Month::June, 2024, "Sampson", "Emma", "Jane Austen", Some("")).await;

        let may = book.find_slot(Month::May, 2024).await.unwrap();
        let june = book.find_slot(Month::June, 2024).await.unwrap();
        assert_eq!(may.link.as_deref(), Some("https://example.org/dune"));
        assert!(june.link.is_none());
    }

    #[tokio::test]
    async fn test_entry_for_distinguishes_stored_and_predicted() {
        let store = Arc::new(MemoryStore::with_rows(vec![BookPick::new(
            Slot::new(Month::March, 2024),
            "Brett",
        )]));
        let book = book_with(store, Slot::new(Month::March, 2024));
        book.load_all().await;

        let stored = book.entry_for(Slot::new(Month::March, 2024)).await;
        let predicted = book.entry_for(Slot::new(Month::April, 2024)).await;

        assert!(!stored.is_predicted());
        assert_eq!(
            predicted,
            ScheduleEntry::Predicted {
                slot: Slot::new(Month::April, 2024),
                member: "Sampson".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_current_and_next_slot_follow_clock() {
        let book = book_with(Arc::new(MemoryStore::new()), Slot::new(Month::December, 2025));
        assert_eq!(book.current_slot(), Slot::new(Month::December, 2025));
        assert_eq!(book.next_slot_after_current(), Slot::new(Month::January, 2026));
        assert_eq!(book.predict_member(Month::December, 2025).await, "Tommy");
    }
}
