use anyhow::Result;
use daylog_core::App;
use dialoguer::Input;

use crate::render::Render;
use crate::utils::date_arg::{parse_date, parse_duration};

pub fn run(
    app: &mut App,
    date: &str,
    description: Option<String>,
    hours: u32,
    minutes: u32,
    duration: Option<&str>,
) -> Result<()> {
    let date = parse_date(date)?;

    let description = match description {
        Some(d) => d,
        None => Input::<String>::new()
            .with_prompt("  What did you do?")
            .interact_text()?,
    };

    let (hours, minutes) = match duration {
        Some(d) => parse_duration(d)?,
        None => (hours, minutes),
    };

    let notice = app.add(date, &description, hours, minutes)?;
    println!("{}", notice.render());

    Ok(())
}
