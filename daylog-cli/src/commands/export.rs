use std::path::Path;

use anyhow::Result;
use daylog_core::App;

use crate::render::Render;

pub fn run(app: &App, path: &Path) -> Result<()> {
    let notice = app.export(path)?;
    println!("{}", notice.render());
    Ok(())
}
