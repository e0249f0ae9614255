//! HTTP API handlers for bookclub-dash

pub mod buildinfo;
pub mod covers;
pub mod dashboard;
pub mod health;
pub mod picks;
pub mod ui;

pub use buildinfo::get_build_info;
pub use covers::get_cover;
pub use dashboard::get_dashboard;
pub use health::health_routes;
pub use picks::{list_picks, submit_pick};
pub use ui::{serve_asset, serve_index};
