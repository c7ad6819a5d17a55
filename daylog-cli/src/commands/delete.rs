use anyhow::Result;
use daylog_core::App;

use crate::render::Render;
use crate::utils::date_arg::parse_date;

/// `target` is a 1-based position from `list`, or an id prefix.
pub fn run(app: &mut App, date: &str, target: &str) -> Result<()> {
    let date = parse_date(date)?;

    let notice = match target.parse::<usize>() {
        Ok(0) => anyhow::bail!("Activity numbers start at 1"),
        Ok(n) => app.delete_displayed(&date, n - 1)?,
        Err(_) => {
            let id = app.store().find_by_id_prefix(&date, target)?;
            app.delete(&date, id)?
        }
    };

    println!("{}", notice.render());
    Ok(())
}
