//! TUI rendering traits for daylog types.
//!
//! Extension traits that add colored terminal rendering to daylog-core types
//! using owo_colors.

use chrono::{Datelike, Local};
use daylog_core::activity::format_total;
use daylog_core::calendar::WEEKDAY_HEADERS;
use daylog_core::{ActivityRecord, CalendarView, Cell, DateKey, Notice};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Notice {
    fn render(&self) -> String {
        match self {
            Notice::Info(msg) => msg.green().to_string(),
            Notice::Warning(msg) => msg.yellow().to_string(),
            Notice::Error(msg) => msg.red().to_string(),
        }
    }
}

/// Marker shown next to days that have activities.
const ACTIVITY_MARK: char = '•';

impl Render for Cell {
    fn render(&self) -> String {
        let mark = if self.has_activities { ACTIVITY_MARK } else { ' ' };
        let text = format!("{:>3}{}", self.date.day(), mark);

        let styled = if self.is_selected {
            text.reversed().to_string()
        } else if self.is_today {
            text.bold().underline().to_string()
        } else if self.is_other_month {
            text.dimmed().to_string()
        } else {
            text
        };

        if self.has_activities && !self.is_selected {
            styled.green().to_string()
        } else {
            styled
        }
    }
}

impl Render for ActivityRecord {
    fn render(&self) -> String {
        let time = self.timestamp.with_timezone(&Local).format("%I:%M %p");
        match &self.duration {
            Some(duration) => format!(
                "{}  {} {}",
                time.dimmed(),
                self.description,
                format!("[{}]", duration).cyan()
            ),
            None => format!("{}  {}", time.dimmed(), self.description),
        }
    }
}

/// Render the month heading, weekday row and six weeks of days.
pub fn render_grid(view: &CalendarView, cells: &[Cell]) -> String {
    let mut lines = Vec::new();

    let width = WEEKDAY_HEADERS.len() * 4;
    lines.push(format!("{:^width$}", view.title()).bold().to_string());
    lines.push(
        WEEKDAY_HEADERS
            .iter()
            .map(|d| format!("{:>4}", d))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for week in cells.chunks(7) {
        lines.push(week.iter().map(Render::render).collect());
    }

    lines.join("\n")
}

/// Render a day's activities (already in display order) as a numbered list.
pub fn render_activities(
    date: &DateKey,
    activities: &[&ActivityRecord],
    total: std::time::Duration,
) -> String {
    let mut lines = vec![date.display_long().bold().to_string()];

    if activities.is_empty() {
        lines.push(format!("   {}", "No activities for this date".dimmed()));
        return lines.join("\n");
    }

    for (i, record) in activities.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {} {}",
            i + 1,
            record.render(),
            format!("({})", record.short_id()).dimmed()
        ));
    }

    if !total.is_zero() {
        lines.push(format!("   {}", format!("Total: {}", format_total(total)).dimmed()));
    }

    lines.join("\n")
}
