//! Core types for daylog.
//!
//! This crate holds everything that is not terminal rendering:
//! - `store` and `activity` for the per-day activity log
//! - `calendar` for the month grid and navigation state
//! - `storage` for the key/value slot the log is persisted to
//! - `app` for the application state that ties them together

pub mod activity;
pub mod app;
pub mod calendar;
pub mod config;
pub mod date_key;
pub mod error;
pub mod storage;
pub mod store;

pub use activity::ActivityRecord;
pub use app::{App, ImportMode, Notice};
pub use calendar::{CalendarView, Cell};
pub use date_key::DateKey;
pub use error::{DaylogError, DaylogResult};
pub use store::ActivityStore;
