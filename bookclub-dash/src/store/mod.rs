//! Record store access
//!
//! The store holds one `books` row per (month, year), unique on that pair.
//! Only two operations exist: select everything, and upsert by slot.

use async_trait::async_trait;
use bookclub_common::BookPick;

use crate::error::Result;

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Table holding the picks
pub const BOOKS_TABLE: &str = "books";

/// Columns forming the upsert conflict key
pub const CONFLICT_KEY: &str = "month,year";

/// Backend holding the book pick rows
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Fetch every row. Ordering is not guaranteed beyond year descending.
    async fn select_all(&self) -> Result<Vec<BookPick>>;

    /// Insert the pick, or replace the row already stored for its (month, year)
    ///
    /// Returns the row as stored.
    async fn upsert(&self, pick: &BookPick) -> Result<BookPick>;
}
