use anyhow::Result;
use daylog_core::App;
use daylog_core::activity::format_total;
use owo_colors::OwoColorize;

use crate::render::{render_activities, render_grid};
use crate::utils::date_arg::{parse_date, parse_month};

pub fn run(app: &mut App, month: Option<&str>, offset: i32, select: Option<&str>) -> Result<()> {
    if let Some(month) = month {
        app.set_view(parse_month(month)?);
    }
    if offset != 0 {
        app.set_view(app.view().advance_month(offset)?);
    }
    if let Some(select) = select {
        app.select(parse_date(select)?);
    }

    print_month(app)
}

/// Print the visible month, its logged total, and the selected day if any.
pub fn print_month(app: &App) -> Result<()> {
    let view = app.view();
    let cells = app.grid()?;
    println!("{}", render_grid(&view, &cells));

    let total = app
        .store()
        .total_duration_in_month(view.visible_year, view.visible_month);
    if !total.is_zero() {
        println!("{}", format!("Logged this month: {}", format_total(total)).dimmed());
    }

    if let Some(date) = view.selected {
        println!();
        println!(
            "{}",
            render_activities(
                &date,
                &app.selected_activities(),
                app.store().total_duration(&date)
            )
        );
    }

    Ok(())
}
