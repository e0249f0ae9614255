//! # Book Club Common Library
//!
//! Shared code for the book club dashboard including:
//! - Schedule model (canonical months, slots, chronological ordering)
//! - Member rotation and assignee prediction
//! - Book pick records and schedule entries
//! - Configuration loading
//! - Clock and timestamp utilities

pub mod config;
pub mod error;
pub mod models;
pub mod rotation;
pub mod schedule;
pub mod time;

pub use error::{Error, Result};
pub use models::{BookPick, RowId, ScheduleEntry};
pub use rotation::Rotation;
pub use schedule::{Month, Slot};
