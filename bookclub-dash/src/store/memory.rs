//! In-process record store
//!
//! Same upsert semantics as the hosted store, keyed on (month, year).
//! Reads and writes can be switched to fail to exercise error paths.

use async_trait::async_trait;
use bookclub_common::{BookPick, RowId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use super::RecordStore;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<BookPick>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    upserts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with rows (ids are assigned where missing)
    pub fn with_rows(rows: Vec<BookPick>) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.id.get_or_insert_with(new_row_id);
                row
            })
            .collect();

        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of rows currently stored
    pub fn len(&self) -> usize {
        self.lock_rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of successful upserts so far
    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    fn lock_rows(&self) -> std::sync::MutexGuard<'_, Vec<BookPick>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn new_row_id() -> RowId {
    RowId::Text(Uuid::new_v4().to_string())
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn select_all(&self) -> Result<Vec<BookPick>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Store("simulated read failure".to_string()));
        }

        let mut rows = self.lock_rows().clone();
        rows.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(rows)
    }

    async fn upsert(&self, pick: &BookPick) -> Result<BookPick> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Store("simulated write failure".to_string()));
        }

        let mut rows = self.lock_rows();
        let stored = match rows.iter_mut().find(|row| row.slot() == pick.slot()) {
            Some(row) => {
                row.member = pick.member.clone();
                row.title = pick.title.clone();
                row.author = pick.author.clone();
                row.link = pick.link.clone();
                row.updated_at = pick.updated_at;
                row.clone()
            }
            None => {
                let mut row = pick.clone();
                row.id = Some(new_row_id());
                rows.push(row.clone());
                row
            }
        };

        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(stored)
    }
}
