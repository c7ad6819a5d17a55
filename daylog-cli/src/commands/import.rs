use std::path::Path;

use anyhow::{Context, Result};
use daylog_core::{App, ImportMode};
use dialoguer::Select;

use crate::render::Render;

pub fn run(app: &mut App, path: &Path, merge: bool, replace: bool) -> Result<()> {
    let mode = if merge {
        ImportMode::Merge
    } else if replace {
        ImportMode::Replace
    } else {
        prompt_mode()?
    };

    let notice = app
        .import(path, mode)
        .with_context(|| format!("Error importing {}", path.display()))?;
    println!("{}", notice.render());

    Ok(())
}

fn prompt_mode() -> Result<ImportMode> {
    let items = ["Merge with existing activities", "Replace all activities"];
    let selection = Select::new()
        .with_prompt("  How should the file be imported?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(if selection == 0 {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    })
}
