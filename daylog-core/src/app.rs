//! Application state: the activity log, the calendar view, and where the log
//! is persisted.
//!
//! Calendar and store operations are pure; this is the one place that does
//! I/O. Every mutation is written through to storage immediately.

use std::fmt;
use std::path::Path;

use uuid::Uuid;

use crate::activity::ActivityRecord;
use crate::calendar::{CalendarView, Cell};
use crate::date_key::DateKey;
use crate::error::DaylogResult;
use crate::storage::{self, Loaded, MemoryStorage, Storage};
use crate::store::ActivityStore;

/// How an imported file is combined with the existing log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Append imported records to each day's existing list.
    Merge,
    /// Discard the existing log and adopt the imported one.
    Replace,
}

/// A message for the user about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notice::Info(msg) | Notice::Warning(msg) | Notice::Error(msg) => write!(f, "{}", msg),
        }
    }
}

pub struct App {
    store: ActivityStore,
    view: CalendarView,
    today: DateKey,
    storage: Box<dyn Storage>,
    storage_key: String,
    persistent: bool,
}

impl App {
    /// Open the log from `storage`.
    ///
    /// If the storage cannot be written, the app continues memory-only. A
    /// corrupted log is discarded. Both cases produce a warning notice.
    pub fn open(
        mut storage: Box<dyn Storage>,
        storage_key: &str,
        today: DateKey,
    ) -> (Self, Vec<Notice>) {
        let mut notices = Vec::new();
        let mut persistent = true;

        if let Err(error) = storage.probe() {
            tracing::warn!(%error, "storage is not available, continuing in memory");
            notices.push(Notice::Warning(
                "Storage is not available. Data will not persist between sessions.".into(),
            ));
            storage = Box::new(MemoryStorage::new());
            persistent = false;
        }

        let store = match storage::load(&storage, storage_key) {
            Loaded::Reset { store, error } => {
                tracing::warn!(%error, "discarding unreadable activity log");
                notices.push(Notice::Warning(
                    "Failed to load saved activities. Starting fresh.".into(),
                ));
                store
            }
            loaded => loaded.into_store(),
        };

        let app = App {
            store,
            view: CalendarView::current(today),
            today,
            storage,
            storage_key: storage_key.to_string(),
            persistent,
        };

        (app, notices)
    }

    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    /// False once the app has fallen back to memory-only storage.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn select(&mut self, date: DateKey) {
        self.view = self.view.select_date(date);
    }

    pub fn next_month(&mut self) -> DaylogResult<()> {
        self.view = self.view.advance_month(1)?;
        Ok(())
    }

    pub fn prev_month(&mut self) -> DaylogResult<()> {
        self.view = self.view.advance_month(-1)?;
        Ok(())
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    pub fn grid(&self) -> DaylogResult<Vec<Cell>> {
        self.view.grid(self.today, &self.store)
    }

    /// The selected day's activities in display order.
    pub fn selected_activities(&self) -> Vec<&ActivityRecord> {
        match &self.view.selected {
            Some(date) => self.store.activities_for(date),
            None => Vec::new(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add(
        &mut self,
        date: DateKey,
        description: &str,
        hours: u32,
        minutes: u32,
    ) -> DaylogResult<Notice> {
        let record = self.store.add_activity(date, description, hours, minutes)?;
        let done = format!("Added \"{}\" on {}", record.description, date);
        Ok(self.persist(done))
    }

    pub fn delete(&mut self, date: &DateKey, id: Uuid) -> DaylogResult<Notice> {
        let removed = self.store.delete_activity(date, id)?;
        Ok(self.persist(format!("Deleted \"{}\"", removed.description)))
    }

    /// Delete the entry at `index` (0-based) of the day's display order.
    pub fn delete_displayed(&mut self, date: &DateKey, index: usize) -> DaylogResult<Notice> {
        let removed = self.store.delete_displayed(date, index)?;
        Ok(self.persist(format!("Deleted \"{}\"", removed.description)))
    }

    /// Read an export file and fold it into the log.
    ///
    /// An unreadable or malformed file is rejected without touching the log.
    pub fn import(&mut self, path: &Path, mode: ImportMode) -> DaylogResult<Notice> {
        let incoming = storage::read_import(path)?;
        Ok(self.import_store(incoming, mode))
    }

    pub fn import_store(&mut self, incoming: ActivityStore, mode: ImportMode) -> Notice {
        tracing::info!(?mode, dates = incoming.date_count(), "importing activities");
        match mode {
            ImportMode::Merge => self.store.import_merge(incoming),
            ImportMode::Replace => self.store.import_replace(incoming),
        }
        self.persist("Activities imported successfully!".into())
    }

    pub fn export(&self, path: &Path) -> DaylogResult<Notice> {
        storage::export_to(path, &self.store)?;
        Ok(Notice::Info(format!(
            "Exported {} activities to {}",
            self.store.record_count(),
            path.display()
        )))
    }

    pub fn clear(&mut self) -> Notice {
        self.store.clear();
        self.persist("All activities have been cleared.".into())
    }

    /// Write the whole log back. A failed save leaves the in-memory change in
    /// place and is reported, not retried.
    fn persist(&mut self, done: String) -> Notice {
        match storage::save(&mut self.storage, &self.storage_key, &self.store) {
            Ok(()) => Notice::Info(done),
            Err(e) => Notice::Error(format!("Failed to save activities: {}", e)),
        }
    }
}
