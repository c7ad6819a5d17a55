use anyhow::Result;
use daylog_core::App;

use crate::render::render_activities;
use crate::utils::date_arg::parse_date;

pub fn run(app: &App, date: &str) -> Result<()> {
    let date = parse_date(date)?;
    let activities = app.store().activities_for(&date);

    println!(
        "{}",
        render_activities(&date, &activities, app.store().total_duration(&date))
    );

    Ok(())
}
