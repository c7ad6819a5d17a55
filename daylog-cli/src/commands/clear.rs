use anyhow::Result;
use daylog_core::App;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(app: &mut App, force: bool) -> Result<()> {
    if app.store().is_empty() {
        println!("{}", "Nothing to clear".dimmed());
        return Ok(());
    }

    if !force {
        let count = app.store().record_count();
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete ALL {} {}? This cannot be undone.",
                count,
                if count == 1 { "activity" } else { "activities" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    println!("{}", app.clear().render());
    Ok(())
}
