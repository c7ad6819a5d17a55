use std::cell::Cell;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use daylog_core::storage::{self, FileStorage, MemoryStorage, Storage, DEFAULT_STORAGE_KEY};
use daylog_core::{ActivityStore, App, CalendarView, DateKey, DaylogError, DaylogResult, ImportMode, Notice};

fn key(s: &str) -> DateKey {
    s.parse().unwrap()
}

fn open_in(dir: &std::path::Path) -> (App, Vec<Notice>) {
    App::open(
        Box::new(FileStorage::new(dir)),
        DEFAULT_STORAGE_KEY,
        key("2024-03-15"),
    )
}

/// Storage whose writes can be switched off after opening.
struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: Rc<Cell<bool>>,
}

impl Storage for FlakyStorage {
    fn get(&self, key: &str) -> DaylogResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> DaylogResult<()> {
        if self.fail_writes.get() {
            return Err(DaylogError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> DaylogResult<()> {
        self.inner.remove(key)
    }
}

#[test]
fn add_is_written_through_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (mut app, notices) = open_in(dir.path());
    assert!(notices.is_empty());
    assert!(app.is_persistent());

    let notice = app.add(key("2024-03-15"), "Run", 0, 30).unwrap();
    assert!(matches!(notice, Notice::Info(_)));
    assert!(dir.path().join("calendarActivities.json").exists());

    let (reopened, _) = open_in(dir.path());
    assert_eq!(reopened.store(), app.store());
    let records = reopened.store().records(&key("2024-03-15"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].duration.as_deref(), Some("0h 30m"));
}

#[test]
fn blank_add_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = open_in(dir.path());

    assert!(matches!(
        app.add(key("2024-03-15"), "  ", 1, 0),
        Err(DaylogError::Validation(_))
    ));
    assert!(app.store().is_empty());
    assert!(!dir.path().join("calendarActivities.json").exists());
}

#[test]
fn deleting_last_entry_removes_the_day_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = open_in(dir.path());
    let day = key("2024-03-15");

    app.add(day, "Run", 0, 30).unwrap();
    app.delete_displayed(&day, 0).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("calendarActivities.json")).unwrap();
    assert_eq!(raw, "{}");
    let (reopened, _) = open_in(dir.path());
    assert!(!reopened.store().has_activities(&day));
}

#[test]
fn corrupted_log_starts_fresh_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("calendarActivities.json"), "not json").unwrap();

    let (app, notices) = open_in(dir.path());
    assert!(app.store().is_empty());
    assert_eq!(
        notices,
        vec![Notice::Warning("Failed to load saved activities. Starting fresh.".into())]
    );
}

#[test]
fn unusable_storage_degrades_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    // a file where the data directory should be makes every write fail
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, "").unwrap();

    let (mut app, notices) = open_in(&blocked);
    assert!(!app.is_persistent());
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], Notice::Warning(_)));

    let notice = app.add(key("2024-03-15"), "Run", 0, 0).unwrap();
    assert!(matches!(notice, Notice::Info(_)));
    assert_eq!(app.store().record_count(), 1);
}

#[test]
fn failed_save_keeps_change_and_reports_error() {
    let fail_writes = Rc::new(Cell::new(false));
    let storage = FlakyStorage {
        inner: MemoryStorage::new(),
        fail_writes: fail_writes.clone(),
    };
    let (mut app, _) = App::open(Box::new(storage), DEFAULT_STORAGE_KEY, key("2024-03-15"));
    assert!(app.is_persistent());

    fail_writes.set(true);
    let notice = app.add(key("2024-03-15"), "Run", 0, 0).unwrap();
    assert!(notice.is_error());
    assert!(notice.to_string().starts_with("Failed to save activities"));
    assert_eq!(app.store().record_count(), 1);
}

#[test]
fn import_merge_and_replace_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = open_in(dir.path());
    let day = key("2024-03-15");
    app.add(day, "x", 0, 0).unwrap();

    let export_path = dir.path().join("incoming.json");
    std::fs::write(
        &export_path,
        r#"{
  "2024-03-15": [
    { "description": "y", "timestamp": "2024-03-15T09:00:00.000Z", "duration": "1h 0m" }
  ]
}"#,
    )
    .unwrap();

    app.import(&export_path, ImportMode::Merge).unwrap();
    let names: Vec<_> = app.store().records(&day).iter().map(|r| r.description.clone()).collect();
    assert_eq!(names, ["x", "y"]);

    app.import(&export_path, ImportMode::Replace).unwrap();
    let names: Vec<_> = app.store().records(&day).iter().map(|r| r.description.clone()).collect();
    assert_eq!(names, ["y"]);

    let (reopened, _) = open_in(dir.path());
    assert_eq!(reopened.store().record_count(), 1);
}

#[test]
fn import_of_non_object_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = open_in(dir.path());
    app.add(key("2024-03-15"), "x", 0, 0).unwrap();
    let before = app.store().clone();

    let path = dir.path().join("list.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    assert!(matches!(
        app.import(&path, ImportMode::Replace),
        Err(DaylogError::InvalidFormat)
    ));
    assert_eq!(app.store(), &before);

    assert!(app.import(&dir.path().join("missing.json"), ImportMode::Merge).is_err());
    assert_eq!(app.store(), &before);
}

#[test]
fn export_is_pretty_and_reimportable() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = open_in(dir.path());
    app.add(key("2024-03-15"), "Run", 0, 30).unwrap();
    app.add(key("2024-03-16"), "Swim", 1, 0).unwrap();

    let path = dir.path().join(storage::DEFAULT_EXPORT_FILE);
    app.export(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"2024-03-15\": ["));
    assert_eq!(&storage::read_import(&path).unwrap(), app.store());
}

#[test]
fn clear_empties_persisted_log() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, _) = open_in(dir.path());
    app.add(key("2024-03-15"), "Run", 0, 30).unwrap();

    app.clear();
    let (reopened, _) = open_in(dir.path());
    assert_eq!(reopened.store(), &ActivityStore::new());
}

#[test]
fn navigation_and_selection() {
    let (mut app, _) = App::open(
        Box::new(MemoryStorage::new()),
        DEFAULT_STORAGE_KEY,
        key("2024-12-31"),
    );
    assert_eq!(app.view().title(), "December 2024");

    app.next_month().unwrap();
    assert_eq!(app.view().title(), "January 2025");
    app.prev_month().unwrap();
    app.prev_month().unwrap();
    assert_eq!(app.view().title(), "November 2024");

    app.select(key("2024-11-05"));
    app.add(key("2024-11-05"), "Vote", 0, 45).unwrap();
    assert_eq!(app.selected_activities().len(), 1);

    let grid = app.grid().unwrap();
    assert_eq!(grid.len(), 42);
    let cell = grid.iter().find(|c| c.key() == key("2024-11-05")).unwrap();
    assert!(cell.is_selected && cell.has_activities && !cell.is_today);
}

#[test]
fn navigation_stops_at_the_end_of_the_date_range() {
    let (mut app, _) = App::open(
        Box::new(MemoryStorage::new()),
        DEFAULT_STORAGE_KEY,
        key("2024-12-31"),
    );
    let last = CalendarView::new(NaiveDate::MAX.year(), 12).unwrap();
    app.set_view(last);

    assert!(app.next_month().is_err());
    assert_eq!(app.view(), last);
    assert!(app.grid().is_err());

    app.prev_month().unwrap();
    assert_eq!(app.grid().unwrap().len(), 42);
}
