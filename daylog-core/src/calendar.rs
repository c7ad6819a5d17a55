//! Month grid and navigation state.

use chrono::{Datelike, Duration, NaiveDate};

use crate::date_key::DateKey;
use crate::error::{DaylogError, DaylogResult};
use crate::store::ActivityStore;

/// Six weeks, Sunday first.
pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Which month is on screen and which day is selected.
///
/// This is derived UI state; it is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub visible_year: i32,
    /// 1-12
    pub visible_month: u32,
    pub selected: Option<DateKey>,
}

/// One day in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub date: NaiveDate,
    pub is_other_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_activities: bool,
}

impl Cell {
    pub fn key(&self) -> DateKey {
        DateKey::new(self.date)
    }
}

impl CalendarView {
    pub fn new(visible_year: i32, visible_month: u32) -> DaylogResult<Self> {
        if !(1..=12).contains(&visible_month) {
            return Err(DaylogError::Validation(format!(
                "Invalid month {}. Expected 1-12",
                visible_month
            )));
        }
        Ok(CalendarView {
            visible_year,
            visible_month,
            selected: None,
        })
    }

    /// The month containing `today`, nothing selected.
    pub fn current(today: DateKey) -> Self {
        CalendarView {
            visible_year: today.year(),
            visible_month: today.month(),
            selected: None,
        }
    }

    /// Move by `delta` months, rolling the year over at either end.
    ///
    /// Fails when the target month lies outside the supported date range.
    pub fn advance_month(self, delta: i32) -> DaylogResult<Self> {
        let index = self
            .visible_year
            .checked_mul(12)
            .and_then(|i| i.checked_add(self.visible_month as i32 - 1))
            .and_then(|i| i.checked_add(delta))
            .ok_or_else(out_of_range)?;

        let (visible_year, visible_month) = (index.div_euclid(12), index.rem_euclid(12) as u32 + 1);
        first_of_month(visible_year, visible_month).ok_or_else(out_of_range)?;

        Ok(CalendarView {
            visible_year,
            visible_month,
            ..self
        })
    }

    /// Select a day. The visible month does not follow the selection.
    pub fn select_date(self, date: DateKey) -> Self {
        CalendarView {
            selected: Some(date),
            ..self
        }
    }

    /// Heading such as "March 2024".
    pub fn title(&self) -> String {
        match first_of_month(self.visible_year, self.visible_month) {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{}-{:02}", self.visible_year, self.visible_month),
        }
    }

    /// The grid for the visible month.
    pub fn grid(&self, today: DateKey, store: &ActivityStore) -> DaylogResult<Vec<Cell>> {
        month_grid(
            self.visible_year,
            self.visible_month,
            today,
            self.selected,
            store,
        )
    }
}

/// Build the 42-cell grid for `year`/`month` (1-12).
///
/// The first cell is the Sunday on or before the 1st, so leading and trailing
/// days from neighbouring months fill out six full weeks.
pub fn month_grid(
    year: i32,
    month: u32,
    today: DateKey,
    selected: Option<DateKey>,
    store: &ActivityStore,
) -> DaylogResult<Vec<Cell>> {
    let start = grid_start(year, month)?;

    (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = start
                .checked_add_signed(Duration::days(offset))
                .ok_or_else(out_of_range)?;
            let key = DateKey::new(date);
            Ok(Cell {
                date,
                is_other_month: date.year() != year || date.month() != month,
                is_today: key == today,
                is_selected: selected == Some(key),
                has_activities: store.has_activities(&key),
            })
        })
        .collect()
}

/// The Sunday on or before the 1st of the month.
pub fn grid_start(year: i32, month: u32) -> DaylogResult<NaiveDate> {
    let first = first_of_month(year, month).ok_or_else(|| {
        DaylogError::Validation(format!("Invalid month {}-{:02}", year, month))
    })?;
    let lead = first.weekday().num_days_from_sunday() as i64;
    first
        .checked_sub_signed(Duration::days(lead))
        .ok_or_else(out_of_range)
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn out_of_range() -> DaylogError {
    DaylogError::Validation("Month is outside the supported date range".into())
}
